//! Binary entry point: single invocation, no CLI flags. Configuration is
//! code-time constants; the run ends when the page walk hits a page with no
//! listings and all in-flight detail fetches have drained.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use sreality_crawler::crawling::CrawlOrchestrator;
use sreality_crawler::infrastructure::{CrawlerConfig, CsvExporter, HttpClient, init_logging};

#[tokio::main]
async fn main() -> Result<()> {
    let _log_guard = init_logging()?;

    let config = Arc::new(CrawlerConfig::default());
    let http = HttpClient::new(&config)?;
    let exporter = Arc::new(CsvExporter::new(&config.output_path));

    let orchestrator = CrawlOrchestrator::new(http, exporter, config);
    let summary = orchestrator.run().await;

    info!(
        "run finished: {} pages walked, {} records collected",
        summary.pages_walked, summary.records
    );
    Ok(())
}
