//! Crawler configuration
//!
//! There are no CLI flags and no config file: a run is a single invocation
//! driven by code-time constants, collected here so every knob lives in one
//! place. `CrawlerConfig::default()` is the configuration of record.

use serde::{Deserialize, Serialize};

/// Code-time constants for a crawl run.
pub mod defaults {
    /// First search-result page to walk.
    pub const START_PAGE: u32 = 800;

    /// Size of the detail-fetcher pool, fixed once at pool start.
    pub const DETAIL_WORKERS: usize = 50;

    /// Search endpoint with the category filters baked in; the page index is
    /// appended per request.
    pub const SEARCH_URL: &str = "https://www.sreality.cz/api/cs/v2/estates?category_main_cb=1&category_type_cb=1&no_shares=1&bez-aukce=1";

    /// Detail endpoint base; the listing id is appended per request.
    pub const DETAIL_URL: &str = "https://www.sreality.cz/api/cs/v2/estates";

    /// Referer the search API expects from a browser client.
    pub const REFERER: &str =
        "https://www.sreality.cz/hledani/prodej/byty?no_shares=1&bez-aukce=1";

    /// User agent of a current desktop Chrome.
    pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36";

    /// Accept-Language header mimicking a Czech/Slovak browser profile.
    pub const ACCEPT_LANGUAGE: &str = "sk-SK,sk;q=0.9,cs;q=0.8,en-US;q=0.7,en;q=0.6";

    /// Where the exported CSV lands.
    pub const OUTPUT_PATH: &str = "sreality_listings.csv";
}

/// Configuration for one crawl run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// First page index of the walk; incremented until a page yields nothing.
    pub start_page: u32,

    /// Number of detail-fetcher workers, started lazily on the first
    /// listing-bearing page and never resized.
    pub detail_workers: usize,

    /// Search endpoint (filters included, no page parameter).
    pub search_url: String,

    /// Detail endpoint base.
    pub detail_url: String,

    /// Referer sent with search requests.
    pub referer: String,

    /// User agent sent with search requests.
    pub user_agent: String,

    /// Accept-Language sent with search requests.
    pub accept_language: String,

    /// Path of the exported CSV file.
    pub output_path: String,
}

impl CrawlerConfig {
    /// URL of one search-result page.
    #[must_use]
    pub fn search_page_url(&self, page: u32) -> String {
        format!("{}&page={}", self.search_url, page)
    }

    /// URL of one listing's detail record.
    #[must_use]
    pub fn detail_page_url(&self, listing_id: &str) -> String {
        format!("{}/{}", self.detail_url, listing_id)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            start_page: defaults::START_PAGE,
            detail_workers: defaults::DETAIL_WORKERS,
            search_url: defaults::SEARCH_URL.to_owned(),
            detail_url: defaults::DETAIL_URL.to_owned(),
            referer: defaults::REFERER.to_owned(),
            user_agent: defaults::USER_AGENT.to_owned(),
            accept_language: defaults::ACCEPT_LANGUAGE.to_owned(),
            output_path: defaults::OUTPUT_PATH.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pool_size_is_fifty() {
        let config = CrawlerConfig::default();
        assert_eq!(config.detail_workers, 50);
        assert_eq!(config.start_page, defaults::START_PAGE);
    }

    #[test]
    fn search_page_url_appends_page_parameter() {
        let config = CrawlerConfig::default();
        let url = config.search_page_url(812);
        assert!(url.starts_with("https://www.sreality.cz/api/cs/v2/estates?"));
        assert!(url.ends_with("&page=812"));
    }

    #[test]
    fn detail_page_url_appends_listing_id() {
        let config = CrawlerConfig::default();
        assert_eq!(
            config.detail_page_url("3021886028"),
            "https://www.sreality.cz/api/cs/v2/estates/3021886028"
        );
    }
}
