//! # Page Walker
//!
//! Walks search-result pages one at a time and feeds the listing ids it
//! finds into the shared work queue. Any page that produces no work ends
//! the walk, so the distinct causes are kept as [`PageOutcome`] variants
//! and collapsed to one boolean only at the orchestration loop.

use std::sync::Arc;

use serde_json::Value;
use tracing::{error, info, warn};

use crate::crawling::queue::WorkSender;
use crate::crawling::tasks::{ListingId, WorkItem};
use crate::infrastructure::config::CrawlerConfig;
use crate::infrastructure::http_client::HttpClient;

/// Result of walking one search page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// At least one listing id was found and enqueued.
    Listings(usize),

    /// The page produced no work: an empty estate list, or a closed queue
    /// that accepted nothing.
    Empty,

    /// The page answered with a non-200 status.
    HttpStatus(u16),

    /// The request failed below HTTP, or the body was not valid JSON.
    TransportError,
}

impl PageOutcome {
    /// The single production-phase termination signal: only a page that
    /// actually enqueued listings keeps the walk going.
    #[must_use]
    pub const fn has_listings(&self) -> bool {
        matches!(self, Self::Listings(_))
    }
}

/// Sequential producer of detail work items.
pub struct PageWalker {
    http: HttpClient,
    queue: WorkSender,
    config: Arc<CrawlerConfig>,
}

impl PageWalker {
    #[must_use]
    pub fn new(http: HttpClient, queue: WorkSender, config: Arc<CrawlerConfig>) -> Self {
        Self {
            http,
            queue,
            config,
        }
    }

    /// Fetches one search page and enqueues every listing id it carries.
    ///
    /// Never propagates an error; every failure mode is logged with the page
    /// index and reported through the returned [`PageOutcome`].
    pub async fn walk_page(&self, page: u32) -> PageOutcome {
        let url = self.config.search_page_url(page);

        let response = match self.http.fetch_browser(&url).await {
            Ok(response) => response,
            Err(e) => {
                error!("client error fetching page {page}: {e}");
                return PageOutcome::TransportError;
            }
        };

        let status = response.status();
        if status.as_u16() != 200 {
            error!("error fetching page {page}: {status}");
            return PageOutcome::HttpStatus(status.as_u16());
        }

        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                error!("client error reading page {page}: {e}");
                return PageOutcome::TransportError;
            }
        };

        let ids = extract_listing_ids(&body);
        if ids.is_empty() {
            warn!("no estates found on page {page}");
            return PageOutcome::Empty;
        }

        let mut enqueued = 0;
        for id in ids {
            if self.queue.push(WorkItem::Listing(id)).is_err() {
                // The pool is gone; nothing left to produce for.
                warn!("work queue closed while producing page {page}");
                break;
            }
            enqueued += 1;
        }
        if enqueued == 0 {
            return PageOutcome::Empty;
        }

        info!("successfully fetched page {page} ({enqueued} listings)");
        PageOutcome::Listings(enqueued)
    }
}

/// Pulls every usable listing id out of a search-page body. Entries without
/// a `hash_id` are skipped without error; a missing estate list reads as
/// empty.
#[must_use]
pub fn extract_listing_ids(body: &Value) -> Vec<ListingId> {
    body.get("_embedded")
        .and_then(|embedded| embedded.get("estates"))
        .and_then(Value::as_array)
        .map(|estates| {
            estates
                .iter()
                .filter_map(ListingId::from_estate_entry)
                .collect()
        })
        .unwrap_or_default()
}
