//! Maintenance overlay script rendering.
//!
//! The script is served to arbitrary visitors and, when executed, covers the
//! page with a full-screen blocking overlay and disables scrolling. It never
//! redirects and never polls; a visitor sees the overlay until they reload
//! after maintenance ends.

/// Default overlay heading.
pub const DEFAULT_TITLE: &str = "Site under maintenance";

/// Default overlay body text.
pub const DEFAULT_MESSAGE: &str =
    "We are performing scheduled maintenance. Please check back soon.";

/// DOM id of the overlay element. Used to avoid mounting it twice.
const OVERLAY_ID: &str = "curtain-maintenance-overlay";

/// Text shown on the overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayText {
    /// Heading.
    pub title: String,
    /// Body text.
    pub message: String,
}

impl Default for OverlayText {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_owned(),
            message: DEFAULT_MESSAGE.to_owned(),
        }
    }
}

/// Render the overlay script for a visitor who must be blocked.
///
/// Title and message are embedded as JSON string literals, which are valid
/// JavaScript string literals, so arbitrary text cannot break out of them.
/// They are assigned through `textContent`, never parsed as HTML.
#[must_use]
pub fn render_overlay(text: &OverlayText) -> String {
    let id = js_string(OVERLAY_ID);
    let title = js_string(&text.title);
    let message = js_string(&text.message);

    format!(
        r#"(function () {{
  var id = {id};
  function mount() {{
    if (document.getElementById(id)) return;
    var overlay = document.createElement("div");
    overlay.id = id;
    overlay.setAttribute("role", "alertdialog");
    overlay.setAttribute("aria-modal", "true");
    overlay.style.cssText = "position:fixed;top:0;left:0;width:100vw;height:100vh;z-index:2147483647;display:flex;flex-direction:column;align-items:center;justify-content:center;background:#0f172a;color:#f8fafc;font-family:system-ui,sans-serif;text-align:center;padding:24px;box-sizing:border-box;";
    var heading = document.createElement("h1");
    heading.textContent = {title};
    heading.style.cssText = "margin:0 0 12px;font-size:2rem;";
    var body = document.createElement("p");
    body.textContent = {message};
    body.style.cssText = "margin:0;font-size:1.1rem;max-width:36rem;";
    overlay.appendChild(heading);
    overlay.appendChild(body);
    document.body.appendChild(overlay);
    document.documentElement.style.overflow = "hidden";
    document.body.style.overflow = "hidden";
  }}
  if (document.readyState === "loading") {{
    document.addEventListener("DOMContentLoaded", mount);
  }} else {{
    mount();
  }}
}})();
"#
    )
}

fn js_string(value: &str) -> String {
    // Serializing a `&str` cannot fail.
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_owned())
}
