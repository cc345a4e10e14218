//! # Detail Fetcher Worker
//!
//! One member of the fixed-size pool draining the work queue. Each worker
//! loops: pop an item, exit on `Stop` (or a closed queue), otherwise fetch
//! the listing's detail record, flatten it, and append it to the shared
//! result collection. A failed fetch is logged and dropped without retrying
//! and without crashing the worker loop.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::crawling::queue::WorkReceiver;
use crate::crawling::record::ListingRecord;
use crate::crawling::tasks::{ListingId, WorkItem};
use crate::infrastructure::config::CrawlerConfig;
use crate::infrastructure::http_client::HttpClient;

/// The shared, append-only collection of flattened listings. Order is
/// completion order, which is nondeterministic relative to production order.
pub type ResultCollection = Arc<Mutex<Vec<ListingRecord>>>;

/// One pool worker.
pub struct DetailFetcher {
    worker_id: usize,
    http: HttpClient,
    queue: WorkReceiver,
    results: ResultCollection,
    config: Arc<CrawlerConfig>,
}

impl DetailFetcher {
    #[must_use]
    pub fn new(
        worker_id: usize,
        http: HttpClient,
        queue: WorkReceiver,
        results: ResultCollection,
        config: Arc<CrawlerConfig>,
    ) -> Self {
        Self {
            worker_id,
            http,
            queue,
            results,
            config,
        }
    }

    /// Worker loop. Runs until this worker observes its `Stop` sentinel;
    /// a closed-and-drained queue counts as one.
    pub async fn run(self) {
        loop {
            let Some(item) = self.queue.pop().await else {
                debug!("worker {} exiting on closed queue", self.worker_id);
                break;
            };
            debug!("worker {} dequeued {} item", self.worker_id, item.kind());

            match item {
                WorkItem::Stop => {
                    debug!("worker {} received stop sentinel", self.worker_id);
                    break;
                }
                WorkItem::Listing(id) => self.fetch_one(&id).await,
            }
        }
    }

    /// Fetches and records one listing. All failure modes degrade to "no
    /// record for this listing" after a log line with the id for context.
    async fn fetch_one(&self, id: &ListingId) {
        info!("fetching details for listing {id}");
        let url = self.config.detail_page_url(id.as_str());

        let response = match self.http.fetch(&url).await {
            Ok(response) => response,
            Err(e) => {
                error!("client error fetching detail {id}: {e}");
                return;
            }
        };

        let status = response.status();
        if status.as_u16() != 200 {
            error!("error fetching detail {id}: {status}");
            return;
        }

        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                error!("client error reading detail {id}: {e}");
                return;
            }
        };

        let record = ListingRecord::from_detail(&body);
        self.results.lock().await.push(record);
        info!("successfully fetched detail {id}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawling::queue::WorkQueue;

    fn make_fetcher(
        worker_id: usize,
        queue: WorkReceiver,
        results: ResultCollection,
    ) -> DetailFetcher {
        let config = Arc::new(CrawlerConfig::default());
        let http = HttpClient::new(&config).unwrap();
        DetailFetcher::new(worker_id, http, queue, results, config)
    }

    #[tokio::test]
    async fn worker_exits_on_stop_sentinel() {
        let queue = WorkQueue::new();
        let results = ResultCollection::default();

        queue.sender().push(WorkItem::Stop).unwrap();
        make_fetcher(0, queue.receiver(), results.clone()).run().await;

        assert!(results.lock().await.is_empty());
    }

    #[tokio::test]
    async fn worker_exits_when_queue_closes() {
        let queue = WorkQueue::new();
        let results = ResultCollection::default();
        let fetcher = make_fetcher(0, queue.receiver(), results);

        let handle = tokio::spawn(fetcher.run());
        drop(queue);

        handle.await.unwrap();
    }
}
