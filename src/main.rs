mod categories;
mod helpers;
mod listing;
mod net;
mod pipeline;
mod records;
mod sources;

use anyhow::{Context, Result};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

use categories::Category;
use net::HttpFetcher;

/// Fixed diagnostics level; the process reads no environment variables.
const LOG_DIRECTIVE: &str = "warn";

fn log_filter() -> EnvFilter {
    EnvFilter::new(LOG_DIRECTIVE)
}

fn init_tracing() {
    // Progress bars and summaries own stdout; diagnostics go to stderr.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    sources::init_bundled()?; // stays sync

    let start = Instant::now();
    let fetcher = HttpFetcher::new().context("build HTTP client")?;
    let out_dir = std::env::current_dir().context("resolve current directory")?;

    for category in Category::ALL {
        let source = sources::by_name(category.source_name())?;
        let report = category
            .scrape(&fetcher, source, &out_dir)
            .await
            .with_context(|| format!("scrape {}", category.noun()))?;

        info!(
            category = category.label(),
            attempted = report.attempted,
            written = report.written,
            elapsed_ms = report.elapsed.as_millis() as u64,
            output = %report.output.display(),
            "category finished"
        );
    }

    println!("Total running time: {:.2} seconds", start.elapsed().as_secs_f64());

    Ok(())
}
