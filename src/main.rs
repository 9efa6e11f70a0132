// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

use clap::Parser;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use httplint::config::Config;
use httplint::exchange::Mode;
use httplint::registry::Registry;

#[derive(Parser, Debug)]
#[command(name = "httplint", about = "Lint the header fields of an HTTP message read from stdin")]
struct Args {
    /// The input mode; overrides the config file
    #[arg(short = 'i', long = "input", value_parser = ["request", "response"])]
    mode: Option<String>,

    /// Assume that the HTTP exchange happened now
    #[arg(short = 'n', long)]
    now: bool,

    /// Optional config TOML path (policy and note suppression)
    #[arg(short = 'c', long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let registry = Registry::standard()?;

    let cfg = if let Some(ref p) = args.config {
        Config::load_from_path(p, &registry).await?
    } else {
        Config::default()
    };

    let mode = match args.mode.as_deref() {
        Some(m) => m.parse::<Mode>().map_err(|e| anyhow::anyhow!(e))?,
        None => cfg.general.mode,
    };
    let now = args.now.then(chrono::Utc::now);

    let mut input = Vec::new();
    tokio::io::stdin().read_to_end(&mut input).await?;
    debug!(bytes = input.len(), %mode, "read input");
    if input.is_empty() {
        warn!("no input on stdin");
    }

    let exchange = httplint::input::analyze(&registry, &input, mode, now, cfg.policy())?;

    let mut out = String::new();
    for note in exchange.notes() {
        out.push_str(&serde_json::to_string(&note.render()?)?);
        out.push('\n');
    }
    let mut stdout = tokio::io::stdout();
    stdout.write_all(out.as_bytes()).await?;
    stdout.flush().await?;

    Ok(())
}
