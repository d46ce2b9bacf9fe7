//! Local invocation harness.
//!
//! Reads function URL events (from `--event` or newline-delimited stdin),
//! dispatches each one through the demo route table and prints one JSON
//! response envelope per line on stdout. Logs go to stderr.

mod demo;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use lambda_router_common::{ConfigFile, LoggingConfig};
use lambda_router_core::{FunctionUrlEvent, InvocationContext, ResponseEnvelope, Router};

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(name = "lambda-router", version, about)]
struct Cli {
    /// TOML configuration file.
    #[arg(long, env = "LAMBDA_ROUTER_CONFIG")]
    config: Option<PathBuf>,

    /// Invoke a single event read from this file instead of stdin.
    #[arg(long)]
    event: Option<PathBuf>,

    /// Emit logs as JSON lines.
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ConfigFile::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ConfigFile::default(),
    };

    init_tracing(&config.logging, cli.json_logs);

    let router = Arc::new(demo::build_router(config.cors).context("Failed to build router")?);

    info!("Router initialized. Available routes:");
    for route in router.routes().iter() {
        info!("  {:<6} {}", route.method(), route.template());
    }

    let mut stdout = tokio::io::stdout();

    if let Some(path) = cli.event {
        let content = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read event {}", path.display()))?;
        let event = FunctionUrlEvent::from_json(&content).context("Invalid event JSON")?;
        let response = invoke(&router, event).await;
        write_response(&mut stdout, &response).await?;
        return Ok(());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        if line.trim().is_empty() {
            continue;
        }

        let response = match FunctionUrlEvent::from_json(&line) {
            Ok(event) => invoke(&router, event).await,
            Err(e) => {
                error!(error = %e, "Skipping invalid event");
                ResponseEnvelope::new(400, format!("Error: invalid event: {e}"))
            }
        };
        write_response(&mut stdout, &response).await?;
    }

    Ok(())
}

/// Initialize tracing. `RUST_LOG` overrides the configured filter.
fn init_tracing(logging: &LoggingConfig, json_flag: bool) {
    let json = json_flag || logging.json;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| logging.filter.as_str().into()),
        )
        .with(json.then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}

/// Dispatch one event.
async fn invoke(router: &Router, event: FunctionUrlEvent) -> ResponseEnvelope {
    let request_id = event
        .request_id()
        .map_or_else(|| Uuid::new_v4().to_string(), str::to_string);
    let ctx = InvocationContext::new(request_id);

    router.handle(&ctx, &event.into_request()).await
}

async fn write_response(
    stdout: &mut tokio::io::Stdout,
    response: &ResponseEnvelope,
) -> anyhow::Result<()> {
    let mut line = serde_json::to_vec(response).context("Failed to encode response")?;
    line.push(b'\n');
    stdout.write_all(&line).await?;
    stdout.flush().await?;
    Ok(())
}
