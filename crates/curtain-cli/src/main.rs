//! Curtain CLI — command-line client for the Curtain maintenance server.
//!
//! A standalone HTTP client that talks to the server's JSON API. No internal
//! crate dependencies.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde_json::Value;

// ── ANSI color helpers ───────────────────────────────────────────────

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const WHITE: &str = "\x1b[37m";

// ── CLI structure ────────────────────────────────────────────────────

/// Curtain — maintenance mode for any website.
#[derive(Parser)]
#[command(
    name = "curtain",
    version,
    about = "Curtain CLI — toggle maintenance mode and manage the IP whitelist",
    long_about = None,
    after_help = format!(
        "{DIM}Environment variables:{RESET}\n  \
         CURTAIN_ADDR  Server address (default: http://127.0.0.1:8080)\n\n\
         {DIM}Examples:{RESET}\n  \
         curtain status\n  \
         curtain toggle\n  \
         curtain whitelist add 203.0.113.7\n  \
         curtain whitelist add --me"
    ),
)]
struct Cli {
    /// Curtain server address.
    #[arg(long, env = "CURTAIN_ADDR", default_value = "http://127.0.0.1:8080")]
    addr: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show whether maintenance mode is enabled.
    Status,
    /// Flip maintenance mode on or off.
    Toggle,
    /// IP whitelist operations.
    Whitelist {
        #[command(subcommand)]
        action: WhitelistCommands,
    },
    /// Show your IP address as the server sees it.
    Whoami,
    /// Print the maintenance script the server would serve to you.
    Script,
}

#[derive(Subcommand)]
enum WhitelistCommands {
    /// List whitelisted addresses.
    List,
    /// Add an address to the whitelist.
    Add {
        /// IP address to whitelist.
        #[arg(required_unless_present = "me", conflicts_with = "me")]
        ip: Option<String>,
        /// Whitelist your own address as the server sees it.
        #[arg(long)]
        me: bool,
    },
    /// Remove an address from the whitelist.
    Remove {
        /// IP address to remove.
        ip: String,
    },
}

// ── Pretty output helpers ────────────────────────────────────────────

fn header(icon: &str, title: &str) {
    println!("{BOLD}{CYAN}{icon} {title}{RESET}");
    println!("{DIM}─────────────────────────────────────────{RESET}");
}

fn kv_line(key: &str, value: &str) {
    println!("  {DIM}{key:<20}{RESET} {WHITE}{value}{RESET}");
}

fn success(msg: &str) {
    println!("{GREEN}{BOLD}✓{RESET} {msg}");
}

fn warning(msg: &str) {
    println!("{YELLOW}{BOLD}⚠{RESET} {YELLOW}{msg}{RESET}");
}

fn print_status(resp: &Value) {
    let enabled = resp.get("enabled").and_then(Value::as_bool).unwrap_or(false);

    header("🚧", "Maintenance Status");
    let state = if enabled {
        format!("{RED}enabled{RESET}")
    } else {
        format!("{GREEN}disabled{RESET}")
    };
    kv_line("Maintenance", &state);
    println!();
}

fn print_whitelist(resp: &Value) {
    header("🔓", "IP Whitelist");

    match resp.as_array() {
        Some(entries) if entries.is_empty() => println!("  {DIM}(no whitelisted IPs yet){RESET}"),
        Some(entries) => {
            for entry in entries {
                let ip = entry.get("ip").and_then(Value::as_str).unwrap_or("?");
                let added = entry
                    .get("created_at")
                    .and_then(Value::as_str)
                    .map_or_else(|| "unknown".to_owned(), format_created_at);
                println!("  {CYAN}├─{RESET} {ip:<40} {DIM}added {added}{RESET}");
            }
        }
        None => println!("{}", serde_json::to_string_pretty(resp).unwrap_or_default()),
    }

    println!();
}

fn format_created_at(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw).map_or_else(
        |_| raw.to_owned(),
        |t| t.with_timezone(&Utc).format("%Y-%m-%d %H:%M UTC").to_string(),
    )
}

// ── HTTP client ──────────────────────────────────────────────────────

struct Client {
    http: reqwest::Client,
    addr: String,
}

impl Client {
    fn new(addr: String) -> Self {
        let http = reqwest::Client::new();
        let addr = addr.trim_end_matches('/').to_owned();
        Self { http, addr }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.addr)
    }

    async fn get(&self, path: &str) -> Result<Value> {
        let resp = self
            .http
            .get(self.url(path))
            .send()
            .await
            .context("request failed")?;
        handle_response(resp).await
    }

    async fn get_text(&self, path: &str) -> Result<String> {
        let resp = self
            .http
            .get(self.url(path))
            .send()
            .await
            .context("request failed")?;
        let status = resp.status();
        let body = resp.text().await.context("failed to read response body")?;
        if !status.is_success() {
            bail!("server returned {status}: {body}");
        }
        Ok(body)
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        let resp = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .context("request failed")?;
        handle_response(resp).await
    }

    async fn post_no_body(&self, path: &str) -> Result<Value> {
        let resp = self
            .http
            .post(self.url(path))
            .send()
            .await
            .context("request failed")?;
        handle_response(resp).await
    }

    async fn delete(&self, path: &str) -> Result<Value> {
        let resp = self
            .http
            .delete(self.url(path))
            .send()
            .await
            .context("request failed")?;
        handle_response(resp).await
    }
}

async fn handle_response(resp: reqwest::Response) -> Result<Value> {
    let status = resp.status();
    let body = resp.text().await.context("failed to read response body")?;
    if !status.is_success() {
        // Server errors carry `{"error": ..., "message": ...}`.
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_owned))
            .unwrap_or(body);
        bail!("server returned {status}: {message}");
    }
    if body.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&body).context("failed to parse response JSON")
}

// ── Command dispatch ─────────────────────────────────────────────────

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let client = Client::new(cli.addr);

    match run(client, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!();
            eprintln!("  {RED}{BOLD}✗ Error:{RESET} {e:#}");
            eprintln!();
            ExitCode::FAILURE
        }
    }
}

async fn run(client: Client, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Status => cmd_status(&client).await,
        Commands::Toggle => cmd_toggle(&client).await,
        Commands::Whitelist { action } => cmd_whitelist(&client, action).await,
        Commands::Whoami => cmd_whoami(&client).await,
        Commands::Script => cmd_script(&client).await,
    }
}

// ── Status commands ──────────────────────────────────────────────────

async fn cmd_status(client: &Client) -> Result<()> {
    let resp = client.get("/maintenance/status").await?;
    println!();
    print_status(&resp);
    Ok(())
}

async fn cmd_toggle(client: &Client) -> Result<()> {
    let resp = client.post_no_body("/maintenance/toggle").await?;
    let enabled = resp.get("enabled").and_then(Value::as_bool).unwrap_or(false);
    println!();
    if enabled {
        warning("Maintenance enabled — non-whitelisted visitors now see the overlay.");
    } else {
        success("Maintenance disabled.");
    }
    println!();
    Ok(())
}

async fn cmd_whoami(client: &Client) -> Result<()> {
    let ip = current_ip(client).await?;
    println!();
    kv_line("Your IP", &ip);
    println!();
    Ok(())
}

async fn cmd_script(client: &Client) -> Result<()> {
    let script = client.get_text("/maintenance/maintenance-script").await?;
    if script.is_empty() {
        println!();
        success("Empty script — you would not see the maintenance overlay.");
        println!();
    } else {
        println!("{script}");
    }
    Ok(())
}

async fn current_ip(client: &Client) -> Result<String> {
    let resp = client.get("/maintenance/current-ip").await?;
    match resp.get("ip").and_then(Value::as_str) {
        Some(ip) => Ok(ip.to_owned()),
        None => bail!("server could not determine your IP address"),
    }
}

// ── Whitelist commands ───────────────────────────────────────────────

async fn cmd_whitelist(client: &Client, action: WhitelistCommands) -> Result<()> {
    match action {
        WhitelistCommands::List => {
            let resp = client.get("/maintenance/whitelist").await?;
            println!();
            print_whitelist(&resp);
        }
        WhitelistCommands::Add { ip, me } => {
            let ip = match ip {
                Some(ip) if !me => ip,
                _ => current_ip(client).await?,
            };
            let body = serde_json::json!({ "ip": ip });
            client.post("/maintenance/whitelist", &body).await?;
            println!();
            success(&format!("{ip} added to whitelist"));
            println!();
        }
        WhitelistCommands::Remove { ip } => {
            // IPv6 addresses contain `:`.
            let path = format!("/maintenance/whitelist/{}", urlencoding::encode(&ip));
            client.delete(&path).await?;
            println!();
            success(&format!("{ip} removed from whitelist"));
            println!();
        }
    }
    Ok(())
}
