//! spa-shell command line.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌──────────────────────────────────────────────────┐
//!                 │                   APPLICATION SHELL               │
//!                 │                                                   │
//!   navigation    │  ┌───────────┐    ┌───────────┐    ┌──────────┐  │
//!   ──────────────┼─▶│ navigator │───▶│  router   │───▶│ ViewHost │  │
//!                 │  │ + history │    │ (1st hit) │    │ mount/   │  │
//!                 │  └───────────┘    └───────────┘    │ unmount  │  │
//!                 │                                    └────┬─────┘  │
//!                 │                                         │ views  │
//!                 │                                         ▼        │
//!                 │  ┌───────────┐    ┌───────────┐    ┌──────────┐  │
//!   document ─────┼─▶│ document  │───▶│  token    │───▶│ gateway  │──┼──▶ Backend
//!   (HTML)        │  │ (shared)  │    │ provider  │    │ + inject │  │
//!                 │  └───────────┘    └───────────┘    └──────────┘  │
//!                 └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde_json::json;

use spa_shell::config::{load_config, ShellConfig};
use spa_shell::observability::logging;
use spa_shell::routing::RecordingHost;
use spa_shell::Shell;

#[derive(Parser)]
#[command(name = "spa-shell")]
#[command(about = "Route dispatcher and CSRF-aware request gateway", long_about = None)]
struct Cli {
    /// TOML configuration file. Built-in defaults when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the compiled route table
    Routes,
    /// Resolve a path to its view
    Resolve { path: String },
    /// Start at the first path, navigate through the rest, print view events
    Navigate {
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Send a request through the gateway
    Request {
        method: String,
        url: String,
        /// Extra header, `Name: value`. Repeatable.
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,
        /// Request body
        #[arg(short, long)]
        data: Option<String>,
        /// HTML document to read the token from
        #[arg(long)]
        document: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ShellConfig::default(),
    };

    if let Err(e) = logging::init(&config.observability.log_level) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let shell = Shell::bootstrap(config)?;

    match cli.command {
        Commands::Routes => {
            let routes = shell.routes();
            let table: Vec<_> = routes
                .entries()
                .iter()
                .map(|entry| {
                    json!({
                        "path": entry.pattern().as_str(),
                        "view": entry.view(),
                        "props": entry.props(),
                    })
                })
                .collect();
            print_json(&json!({ "routes": table, "fallback": routes.fallback() }))?;
        }
        Commands::Resolve { path } => {
            let navigator = shell.navigator(RecordingHost::new(), &path)?;
            print_json(navigator.current())?;
        }
        Commands::Navigate { paths } => {
            let (initial, rest) = paths
                .split_first()
                .ok_or("at least one path is required")?;
            let mut navigator = shell.navigator(RecordingHost::new(), initial)?;
            for path in rest {
                navigator.navigate(path)?;
            }
            print_json(&json!({
                "current": navigator.current(),
                "events": navigator.host().events(),
            }))?;
        }
        Commands::Request {
            method,
            url,
            headers,
            data,
            document,
        } => {
            if let Some(path) = document {
                let html = std::fs::read_to_string(&path)?;
                shell.document().load_html(&html);
            }

            let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())?;
            let headers = parse_headers(&headers)?;
            let body = data.map(String::into_bytes);

            let res = shell
                .gateway()
                .request(method, &url, Some(headers), body)
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

fn parse_headers(raw: &[String]) -> Result<HeaderMap, Box<dyn std::error::Error>> {
    let mut headers = HeaderMap::new();
    for line in raw {
        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| format!("header '{line}' must look like 'Name: value'"))?;
        headers.append(
            HeaderName::from_bytes(name.trim().as_bytes())?,
            HeaderValue::from_str(value.trim())?,
        );
    }
    Ok(headers)
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;
    match serde_json::from_str::<serde_json::Value>(&text) {
        Ok(body) => print_json(&json!({ "status": status.as_u16(), "body": body }))?,
        Err(_) => {
            println!("{status}");
            println!("{text}");
        }
    }
    Ok(())
}
