//! CSV record store — the dataset provider collaborator.
//!
//! Loads the water-quality CSV once at startup into an immutable
//! [`RecordSet`]. Any failure here (missing file, malformed rows,
//! missing region column, no data) happens before the first question
//! runs and is a precondition failure for the whole session.

use aquadata_core::error::DatasetError;
use aquadata_core::record::{Record, RecordSet};
use std::path::Path;
use tracing::info;

/// Loads CSV files into record sets.
pub struct CsvStore;

impl CsvStore {
    /// Load a CSV file, validating that `region_column` exists among
    /// its headers.
    pub fn load(path: impl AsRef<Path>, region_column: &str) -> Result<RecordSet, DatasetError> {
        let path = path.as_ref();

        let mut reader = csv::Reader::from_path(path).map_err(|e| DatasetError::Io {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| DatasetError::Parse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?
            .iter()
            .map(str::to_string)
            .collect();

        let region_index = headers
            .iter()
            .position(|h| h == region_column)
            .ok_or_else(|| DatasetError::MissingRegionColumn {
                column: region_column.to_string(),
            })?;

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row.map_err(|e| DatasetError::Parse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
            records.push(Record::new(row.iter().map(str::to_string).collect()));
        }

        if records.is_empty() {
            return Err(DatasetError::Empty {
                path: path.to_path_buf(),
            });
        }

        info!(
            path = %path.display(),
            rows = records.len(),
            columns = headers.len(),
            "dataset loaded"
        );

        Ok(RecordSet::new(headers, region_index, records))
    }
}
