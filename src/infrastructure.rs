//! Infrastructure layer: HTTP transport, configuration, logging, and the
//! tabular-export collaborator.

pub mod config;
pub mod export;
pub mod http_client;
pub mod logging;

pub use config::CrawlerConfig;
pub use export::{CsvExporter, ExportError, ExportReport, RecordExporter};
pub use http_client::{HttpClient, HttpClientError};
pub use logging::init_logging;
