//! # Crawl Orchestrator
//!
//! Owns the shared queue and result collection and drives the run through
//! its three phases: production (sequential page walk with a lazily started
//! worker pool), drain (one stop sentinel per started worker, then wait),
//! and export. No error in any phase terminates the process; operators see
//! failures only in the log.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::crawling::detail_fetcher::{DetailFetcher, ResultCollection};
use crate::crawling::page_walker::PageWalker;
use crate::crawling::queue::WorkQueue;
use crate::crawling::tasks::WorkItem;
use crate::infrastructure::config::CrawlerConfig;
use crate::infrastructure::export::RecordExporter;
use crate::infrastructure::http_client::HttpClient;

/// Closing numbers of one run.
#[derive(Debug, Clone)]
pub struct CrawlSummary {
    /// Pages that yielded at least one listing.
    pub pages_walked: u32,

    /// Records accumulated across all workers.
    pub records: usize,

    /// Wall-clock duration of the whole run.
    pub elapsed: Duration,
}

/// Drives one complete crawl run.
pub struct CrawlOrchestrator {
    http: HttpClient,
    exporter: Arc<dyn RecordExporter>,
    config: Arc<CrawlerConfig>,
}

impl CrawlOrchestrator {
    #[must_use]
    pub fn new(
        http: HttpClient,
        exporter: Arc<dyn RecordExporter>,
        config: Arc<CrawlerConfig>,
    ) -> Self {
        Self {
            http,
            exporter,
            config,
        }
    }

    /// Runs production, drain, and export to completion.
    pub async fn run(&self) -> CrawlSummary {
        let started = Instant::now();
        info!(
            "scraping run started at {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        );

        let queue = WorkQueue::new();
        let sender = queue.sender();
        let results = ResultCollection::default();
        let walker = PageWalker::new(
            self.http.clone(),
            sender.clone(),
            Arc::clone(&self.config),
        );

        // Production phase. The pool starts lazily on the first page that
        // yields listings and keeps draining while later pages are walked.
        let mut workers: Vec<JoinHandle<()>> = Vec::new();
        let mut page = self.config.start_page;
        let mut pages_walked = 0_u32;
        loop {
            info!("currently scraping page {page}");
            let outcome = walker.walk_page(page).await;
            if !outcome.has_listings() {
                warn!("no details found on page {page}, stopping production");
                break;
            }
            pages_walked += 1;

            if workers.is_empty() {
                info!(
                    "starting detail pool with {} workers",
                    self.config.detail_workers
                );
                for worker_id in 0..self.config.detail_workers {
                    let fetcher = DetailFetcher::new(
                        worker_id,
                        self.http.clone(),
                        queue.receiver(),
                        results.clone(),
                        Arc::clone(&self.config),
                    );
                    workers.push(tokio::spawn(fetcher.run()));
                }
            }

            page += 1;
        }

        // Drain phase: exactly one sentinel per started worker, then wait
        // for every worker to observe its sentinel. No timeout.
        for _ in &workers {
            if sender.push(WorkItem::Stop).is_err() {
                break;
            }
        }
        for (worker_id, joined) in futures::future::join_all(workers)
            .await
            .into_iter()
            .enumerate()
        {
            if let Err(e) = joined {
                error!("worker {worker_id} terminated abnormally: {e}");
            }
        }

        // Export phase. A failed export is logged; the run still completes.
        let records = {
            let mut guard = results.lock().await;
            std::mem::take(&mut *guard)
        };
        match self.exporter.export(&records).await {
            Ok(report) => info!(
                "successfully exported scraped data to {}",
                report.path.display()
            ),
            Err(e) => error!("error exporting scraped data: {e}"),
        }

        let elapsed = started.elapsed();
        info!("this operation took: {:.3} seconds", elapsed.as_secs_f64());
        let minutes = elapsed.as_secs() / 60;
        let seconds = elapsed.as_secs() % 60;
        info!("this operation took: {minutes} minutes {seconds} seconds");

        CrawlSummary {
            pages_walked,
            records: records.len(),
            elapsed,
        }
    }
}
