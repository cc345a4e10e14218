//! HTTP client for the sreality API
//!
//! Thin wrapper around `reqwest` shared by the page walker and the detail
//! fetchers. Search requests carry a fixed browser header set (the API
//! rejects obviously non-browser clients); detail requests go out bare.
//!
//! Deliberately no per-request timeout and no throttling: a hung request
//! stalls its one worker, which is the accepted failure mode of this batch.

use reqwest::{
    Client, Response,
    header::{
        ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderName, HeaderValue, REFERER, USER_AGENT,
    },
};
use url::Url;

use crate::infrastructure::config::CrawlerConfig;

/// Errors raised while building the client or issuing requests.
#[derive(Debug, thiserror::Error)]
pub enum HttpClientError {
    #[error("invalid header value for {0}")]
    InvalidHeader(&'static str),

    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Shared HTTP client; cheap to clone via the inner `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    browser_headers: HeaderMap,
}

impl HttpClient {
    /// Builds the client and the browser header set once.
    pub fn new(config: &CrawlerConfig) -> Result<Self, HttpClientError> {
        let client = Client::builder().build()?;

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/plain, */*"),
        );
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_str(&config.accept_language)
                .map_err(|_| HttpClientError::InvalidHeader("accept-language"))?,
        );
        headers.insert(
            REFERER,
            HeaderValue::from_str(&config.referer)
                .map_err(|_| HttpClientError::InvalidHeader("referer"))?,
        );
        headers.insert(
            HeaderName::from_static("sec-ch-ua"),
            HeaderValue::from_static("\"Google\""),
        );
        headers.insert(
            HeaderName::from_static("sec-ch-ua-mobile"),
            HeaderValue::from_static("?0"),
        );
        headers.insert(
            HeaderName::from_static("sec-ch-ua-platform"),
            HeaderValue::from_static("\"Windows\""),
        );
        headers.insert(
            HeaderName::from_static("sec-fetch-dest"),
            HeaderValue::from_static("empty"),
        );
        headers.insert(
            HeaderName::from_static("sec-fetch-mode"),
            HeaderValue::from_static("cors"),
        );
        headers.insert(
            HeaderName::from_static("sec-fetch-site"),
            HeaderValue::from_static("same-origin"),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|_| HttpClientError::InvalidHeader("user-agent"))?,
        );

        Ok(Self {
            client,
            browser_headers: headers,
        })
    }

    /// GET without extra headers (detail endpoint). The response is returned
    /// whatever its status; callers decide how to treat non-2xx.
    pub async fn fetch(&self, url: &str) -> Result<Response, HttpClientError> {
        let url = Self::parse(url)?;
        tracing::debug!("GET {url}");
        Ok(self.client.get(url).send().await?)
    }

    /// GET with the browser header set (search endpoint).
    pub async fn fetch_browser(&self, url: &str) -> Result<Response, HttpClientError> {
        let url = Self::parse(url)?;
        tracing::debug!("GET {url} (browser headers)");
        Ok(self
            .client
            .get(url)
            .headers(self.browser_headers.clone())
            .send()
            .await?)
    }

    fn parse(url: &str) -> Result<Url, HttpClientError> {
        Url::parse(url).map_err(|source| HttpClientError::InvalidUrl {
            url: url.to_owned(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_builds_from_default_config() {
        let config = CrawlerConfig::default();
        assert!(HttpClient::new(&config).is_ok());
    }

    #[test]
    fn browser_header_set_matches_a_browser_profile() {
        let config = CrawlerConfig::default();
        let client = HttpClient::new(&config).unwrap();

        let headers = &client.browser_headers;
        assert_eq!(
            headers.get(ACCEPT).unwrap(),
            "application/json, text/plain, */*"
        );
        assert_eq!(headers.get("sec-fetch-mode").unwrap(), "cors");
        assert!(
            headers
                .get(USER_AGENT)
                .unwrap()
                .to_str()
                .unwrap()
                .contains("Mozilla/5.0")
        );
    }

    #[tokio::test]
    async fn invalid_url_is_rejected_before_any_io() {
        let config = CrawlerConfig::default();
        let client = HttpClient::new(&config).unwrap();

        let result = client.fetch("not a url").await;
        assert!(matches!(result, Err(HttpClientError::InvalidUrl { .. })));
    }
}
