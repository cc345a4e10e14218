//! # Crawling Domain
//!
//! Producer/consumer core of the crawler: a sequential page walker produces
//! listing ids into an unbounded shared queue; a fixed-size pool of detail
//! fetchers consumes them, flattening each detail payload into a record;
//! the orchestrator owns the shared state, the sentinel-based shutdown, and
//! the final export hand-off.

pub mod detail_fetcher;
pub mod orchestrator;
pub mod page_walker;
pub mod queue;
pub mod record;
pub mod tasks;

pub use detail_fetcher::{DetailFetcher, ResultCollection};
pub use orchestrator::{CrawlOrchestrator, CrawlSummary};
pub use page_walker::{PageOutcome, PageWalker};
pub use queue::{QueueError, WorkQueue, WorkReceiver, WorkSender};
pub use record::{BASE_FIELDS, ListingRecord};
pub use tasks::{ListingId, WorkItem};
