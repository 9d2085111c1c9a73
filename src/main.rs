//! goodreads-shelf-sync: one-shot export of a Goodreads shelf feed to JSON.
//!
//! Reads `GOODREADS_RSS_FEED_URL` / `GOODREADS_OUT_FILE` (or `config/goodreads.toml`),
//! writes the normalized books, and exits non-zero on failure.

use std::process::ExitCode;

use goodreads_shelf_sync::config::load_config_default;
use goodreads_shelf_sync::run_from_config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("goodreads_shelf_sync=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

async fn run() -> anyhow::Result<()> {
    let cfg = load_config_default()?;
    let report = run_from_config(&cfg).await?;
    if report.skipped {
        println!("No Goodreads RSS feed configured (set GOODREADS_RSS_FEED_URL); nothing written.");
    } else {
        println!(
            "Wrote {} books to {}",
            report.written,
            report.out_file.display()
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error fetching Goodreads RSS feed: {e:#}");
            ExitCode::FAILURE
        }
    }
}
