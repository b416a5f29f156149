//! Rankboard CLI
//!
//! Command-line interface for Rankboard operations:
//! - Render a snapshot file to HTML
//! - Print the event recap
//! - Check and refresh a running server

use chrono::Utc;
use clap::{Parser, Subcommand};
use rankboard::recap::Recap;
use rankboard::render::{render_dashboard, render_page, PageOptions};
use rankboard::snapshot::{FileSource, SnapshotSource};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rankboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Live ranked-ladder player cards")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Server URL
    #[arg(long, default_value = "http://localhost:5000", global = true)]
    pub api_url: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a snapshot file to HTML on stdout
    Render {
        /// Path to the snapshot JSON
        path: PathBuf,
        /// Emit a full page instead of the card fragment
        #[arg(long)]
        page: bool,
    },

    /// Print the event recap for a snapshot file
    Recap {
        /// Path to the snapshot JSON
        path: PathBuf,
        /// Also write the recap to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show server status
    Status,

    /// Ask the server to refresh now
    Refresh,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Render { path, page } => {
            let snapshot = FileSource::new(&path).fetch().await?;
            let cards = render_dashboard(&snapshot);

            if page {
                print!("{}", render_page(&cards, &PageOptions::default()));
            } else {
                print!("{}", cards);
            }
        }

        Commands::Recap { path, output, json } => {
            let snapshot = FileSource::new(&path).fetch().await?;
            let recap = Recap::compute(&snapshot);

            let report = if json {
                serde_json::to_string_pretty(&recap)?
            } else {
                recap.to_text()
            };
            print!("{}", report);
            if json {
                println!();
            }

            if let Some(path) = output {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&path, &report)?;
                eprintln!("Recap saved to {:?}", path);
            }
        }

        Commands::Status => {
            let response = client.get(format!("{}/health", cli.api_url)).send().await;

            match response {
                Ok(resp) if resp.status().is_success() => {
                    let health: serde_json::Value = resp.json().await?;

                    println!("Rankboard v{}", env!("CARGO_PKG_VERSION"));
                    println!();
                    println!(
                        "Server status: {}",
                        health["status"].as_str().unwrap_or("unknown")
                    );
                    println!(
                        "Dashboard: {}",
                        health["dashboard"].as_str().unwrap_or("unknown")
                    );

                    if let Some(last) = health["last_success"].as_str() {
                        println!("Last refresh: {}", describe_age(last));
                    }
                    if let Some(error) = health["last_error"].as_str() {
                        println!("Last error: {}", error);
                    }

                    if let Some(uptime) = health["uptime_seconds"].as_u64() {
                        println!();
                        println!("Uptime: {}", format_duration(uptime));
                    }
                }
                Ok(resp) => {
                    eprintln!("Server returned error: {}", resp.status());
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("Cannot connect to Rankboard at {}", cli.api_url);
                    eprintln!("Error: {}", e);
                    eprintln!();
                    eprintln!("Make sure the server is running:");
                    eprintln!("  cargo run --bin rankboard");
                    std::process::exit(1);
                }
            }
        }

        Commands::Refresh => {
            let response = client
                .post(format!("{}/api/v1/refresh", cli.api_url))
                .send()
                .await?;

            if !response.status().is_success() {
                let status = response.status();
                let text = response.text().await.unwrap_or_default();
                eprintln!("Refresh failed ({}): {}", status, text);
                std::process::exit(1);
            }

            let result: serde_json::Value = response.json().await?;
            match result["outcome"].as_str() {
                Some("applied") => println!(
                    "Dashboard refreshed: {} accounts",
                    result["accounts"].as_u64().unwrap_or(0)
                ),
                Some("superseded") => println!("Refresh superseded by a newer one"),
                _ => {
                    eprintln!(
                        "Refresh failed: {}",
                        result["error"].as_str().unwrap_or("unknown error")
                    );
                    std::process::exit(1);
                }
            }
        }

        Commands::Config { output } => {
            let config = rankboard::config::generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

/// `2025-12-05T20:01:00Z (3m 12s ago)`
fn describe_age(rfc3339: &str) -> String {
    match chrono::DateTime::parse_from_rfc3339(rfc3339) {
        Ok(dt) => {
            let age = (Utc::now() - dt.with_timezone(&Utc)).num_seconds().max(0) as u64;
            format!("{} ({} ago)", rfc3339, format_duration(age))
        }
        Err(_) => rfc3339.to_string(),
    }
}

fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else if seconds < 86400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86400, (seconds % 86400) / 3600)
    }
}
