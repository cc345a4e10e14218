//! sreality-crawler: batch crawler for sreality.cz estate listings
//!
//! Walks the paginated search API sequentially, fans the discovered listing
//! ids out to a fixed-size pool of concurrent detail fetchers, flattens each
//! detail payload into a tabular record, and exports the accumulated
//! collection as CSV at the end of the run.

pub mod crawling;
pub mod infrastructure;

pub use crawling::{CrawlOrchestrator, CrawlSummary, ListingRecord};
pub use infrastructure::{CrawlerConfig, CsvExporter, HttpClient};
