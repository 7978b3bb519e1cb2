//! Admin page at `/`.
//!
//! A single self-contained HTML page that talks to the JSON API on the same
//! origin. It shows the current status with a toggle button, the caller's IP
//! with a shortcut to whitelist it, and the whitelist with remove buttons.
//! Every error is shown as a transient toast, and state is always re-fetched
//! after a successful mutation.

use std::sync::Arc;

use axum::Router;
use axum::response::Html;
use axum::routing::get;

use crate::state::AppState;

/// Build the UI router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(admin_page))
}

async fn admin_page() -> Html<&'static str> {
    Html(ADMIN_PAGE)
}

const ADMIN_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en"><head><meta charset="utf-8"/><meta name="viewport" content="width=device-width,initial-scale=1"/>
<title>Curtain &mdash; Maintenance Control Panel</title>
<style>
*,*::before,*::after{box-sizing:border-box}
body{margin:0;font-family:system-ui,-apple-system,sans-serif;background:#f8fafc;color:#0f172a}
.wrap{max-width:960px;margin:0 auto;padding:24px}
.bar{display:flex;align-items:center;justify-content:space-between;background:#475569;color:#fff;padding:16px 24px}
.bar h1{margin:0;font-size:20px}
.card{background:#fff;border:1px solid #e2e8f0;border-radius:4px;padding:24px;margin-top:16px}
.card h2{margin:0 0 12px;font-size:16px}
button{cursor:pointer;border:0;border-radius:4px;padding:8px 14px;font-size:14px}
.on{background:#dc2626;color:#fff}.off{background:#2563eb;color:#fff}
.ghost{background:#e2e8f0;color:#0f172a}
form{display:flex;gap:12px;margin-bottom:12px}
input{flex:1;padding:8px;border:1px solid #cbd5e1;border-radius:4px;font-size:14px}
.row{display:flex;align-items:center;justify-content:space-between;padding:12px;background:#f1f5f9;border-radius:6px;margin-top:8px}
.muted{color:#64748b;font-size:13px}
.empty{text-align:center;color:#64748b;padding:16px 0}
#toast{position:fixed;top:16px;left:50%;transform:translateX(-50%);padding:10px 16px;border-radius:4px;color:#fff;display:none}
</style></head>
<body>
<div id="toast"></div>
<div class="wrap">
  <div class="bar"><h1>Maintenance Control Panel</h1><button id="toggle" class="off" type="button">Enable Maintenance</button></div>
  <div class="card">
    <h2>Current Status</h2>
    <div>Maintenance: <strong id="status">&hellip;</strong></div>
    <div>Your IP: <strong id="ip">&hellip;</strong></div>
  </div>
  <div class="card">
    <h2>IP Whitelist</h2>
    <form id="add"><input id="new-ip" type="text" placeholder="Enter IP address"/><button class="off" type="submit">Add</button></form>
    <button id="use-ip" class="ghost" type="button" disabled>Loading your IP&hellip;</button>
    <div id="list"></div>
  </div>
</div>
<script>
(function () {
  var base = "/maintenance";
  var userIp = null;
  var toastTimer = null;

  function toast(text, ok) {
    var el = document.getElementById("toast");
    el.textContent = text;
    el.style.background = ok ? "#16a34a" : "#dc2626";
    el.style.display = "block";
    clearTimeout(toastTimer);
    toastTimer = setTimeout(function () { el.style.display = "none"; }, 3000);
  }

  function request(method, path, body) {
    var init = { method: method, headers: {} };
    if (body !== undefined) {
      init.headers["Content-Type"] = "application/json; charset=UTF-8";
      init.body = JSON.stringify(body);
    }
    return fetch(base + path, init).then(function (res) {
      return res.text().then(function (text) {
        var data = text ? JSON.parse(text) : null;
        if (!res.ok) throw new Error((data && data.message) || res.statusText);
        return data;
      });
    });
  }

  function renderStatus(enabled) {
    document.getElementById("status").textContent = enabled ? "Enabled" : "Disabled";
    var btn = document.getElementById("toggle");
    btn.textContent = (enabled ? "Disable" : "Enable") + " Maintenance";
    btn.className = enabled ? "on" : "off";
  }

  function renderList(entries) {
    var list = document.getElementById("list");
    list.textContent = "";
    if (entries.length === 0) {
      var empty = document.createElement("p");
      empty.className = "empty";
      empty.textContent = "No whitelisted IPs yet";
      list.appendChild(empty);
      return;
    }
    entries.forEach(function (entry) {
      var row = document.createElement("div");
      row.className = "row";
      var info = document.createElement("div");
      var ip = document.createElement("div");
      ip.textContent = entry.ip;
      var added = document.createElement("div");
      added.className = "muted";
      added.textContent = "Added on " + new Date(entry.created_at).toLocaleDateString();
      info.appendChild(ip);
      info.appendChild(added);
      var remove = document.createElement("button");
      remove.className = "ghost";
      remove.type = "button";
      remove.textContent = "Remove";
      remove.onclick = function () {
        request("DELETE", "/whitelist/" + encodeURIComponent(entry.ip))
          .then(loadWhitelist)
          .catch(function (e) { toast(e.message, false); });
      };
      row.appendChild(info);
      row.appendChild(remove);
      list.appendChild(row);
    });
  }

  function loadStatus() {
    return request("GET", "/status").then(function (s) { renderStatus(s.enabled); })
      .catch(function (e) { toast(e.message, false); });
  }

  function loadWhitelist() {
    return request("GET", "/whitelist").then(renderList)
      .catch(function (e) { toast(e.message, false); });
  }

  function loadIp() {
    return request("GET", "/current-ip").then(function (r) {
      userIp = r.ip;
      document.getElementById("ip").textContent = userIp || "Failed to load IP";
      var btn = document.getElementById("use-ip");
      btn.disabled = !userIp;
      btn.textContent = userIp ? "Click to use your IP (" + userIp + ")" : "IP unavailable";
    }).catch(function (e) { toast(e.message, false); });
  }

  document.getElementById("toggle").onclick = function () {
    request("POST", "/toggle").then(function (s) {
      toast("Maintenance " + (s.enabled ? "Enabled" : "Disabled"), true);
      return loadStatus();
    }).catch(function (e) { toast(e.message, false); });
  };

  document.getElementById("use-ip").onclick = function () {
    if (userIp) document.getElementById("new-ip").value = userIp;
  };

  document.getElementById("add").onsubmit = function (ev) {
    ev.preventDefault();
    var input = document.getElementById("new-ip");
    request("POST", "/whitelist", { ip: input.value }).then(function () {
      input.value = "";
      toast("IP whitelisted", true);
      return loadWhitelist();
    }).catch(function (e) { toast(e.message, false); });
  };

  loadIp();
  loadStatus();
  loadWhitelist();
})();
</script>
</body></html>
"##;
