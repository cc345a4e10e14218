//! Tabular export
//!
//! The run's only output artifact. The exporter is a trait seam so the
//! orchestrator stays ignorant of the format; the shipped implementation
//! writes one CSV file whose schema is inferred from the union of keys
//! across all records.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::info;

use crate::crawling::record::{BASE_FIELDS, ListingRecord};

/// Errors raised during export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// What an export produced, for the closing log line.
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub path: PathBuf,
    pub rows: usize,
    pub columns: usize,
    pub finished_at: chrono::DateTime<chrono::Utc>,
}

/// Consumer of the final result collection.
#[async_trait]
pub trait RecordExporter: Send + Sync {
    /// Writes all records to the export target.
    async fn export(&self, records: &[ListingRecord]) -> Result<ExportReport, ExportError>;
}

/// CSV exporter writing to a fixed path.
pub struct CsvExporter {
    path: PathBuf,
}

impl CsvExporter {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Schema of the output: the base columns in their fixed order, then
    /// every remaining key in first-seen order across records.
    fn columns(records: &[ListingRecord]) -> Vec<String> {
        let mut columns: Vec<String> = BASE_FIELDS.iter().map(|&f| f.to_owned()).collect();
        for record in records {
            for key in record.keys() {
                if !columns.iter().any(|c| c.as_str() == key) {
                    columns.push(key.to_owned());
                }
            }
        }
        columns
    }

    fn write_to(path: &Path, records: &[ListingRecord]) -> Result<(usize, usize), csv::Error> {
        let columns = Self::columns(records);
        let mut writer = csv::Writer::from_path(path)?;

        writer.write_record(&columns)?;
        for record in records {
            writer.write_record(columns.iter().map(|column| record.cell(column)))?;
        }
        writer.flush()?;

        Ok((records.len(), columns.len()))
    }
}

#[async_trait]
impl RecordExporter for CsvExporter {
    async fn export(&self, records: &[ListingRecord]) -> Result<ExportReport, ExportError> {
        let (rows, columns) =
            Self::write_to(&self.path, records).map_err(|source| ExportError::Write {
                path: self.path.clone(),
                source,
            })?;

        let report = ExportReport {
            path: self.path.clone(),
            rows,
            columns,
            finished_at: chrono::Utc::now(),
        };
        info!(
            "exported {} rows x {} columns to {}",
            report.rows,
            report.columns,
            report.path.display()
        );
        Ok(report)
    }
}
