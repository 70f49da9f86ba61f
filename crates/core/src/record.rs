//! Tabular record model for the water-quality dataset.
//!
//! The core treats the dataset as an opaque, ordered sequence of rows
//! with named columns. The only field meaning it relies on is the
//! region label (for filtering); everything else just needs to render
//! as text so it can ground the model.

use serde::{Deserialize, Serialize};

/// One row of the dataset: an ordered vector of string fields.
///
/// Field semantics are owned by the data source, not by the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub fields: Vec<String>,
}

impl Record {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }
}

/// An ordered collection of records with column headers.
///
/// Immutable once loaded; filtering produces a new set with the
/// matching rows cloned in their original order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSet {
    headers: Vec<String>,
    region_column: usize,
    records: Vec<Record>,
}

impl RecordSet {
    /// Create a record set. `region_column` is the index of the column
    /// holding the region label (validated by the loader).
    pub fn new(headers: Vec<String>, region_column: usize, records: Vec<Record>) -> Self {
        Self {
            headers,
            region_column,
            records,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All rows whose region label equals `region`, original order kept.
    pub fn filter_by_region(&self, region: &str) -> RecordSet {
        let records = self
            .records
            .iter()
            .filter(|r| r.fields.get(self.region_column).map(String::as_str) == Some(region))
            .cloned()
            .collect();

        RecordSet {
            headers: self.headers.clone(),
            region_column: self.region_column,
            records,
        }
    }

    /// Unique region labels, sorted.
    pub fn regions(&self) -> Vec<String> {
        let mut regions: Vec<String> = self
            .records
            .iter()
            .filter_map(|r| r.fields.get(self.region_column))
            .cloned()
            .collect();
        regions.sort();
        regions.dedup();
        regions
    }

    /// The first `n` records (all of them if fewer).
    pub fn head(&self, n: usize) -> RecordSet {
        RecordSet {
            headers: self.headers.clone(),
            region_column: self.region_column,
            records: self.records.iter().take(n).cloned().collect(),
        }
    }

    /// Render as a fixed-width table: a header line, then one line per
    /// record with a leading row-index column. Column order is the CSV
    /// order; widths are padded by character count so the rendering is
    /// stable for identical inputs. An empty set renders as "".
    pub fn to_table_string(&self) -> String {
        if self.records.is_empty() {
            return String::new();
        }

        let index_width = (self.records.len() - 1).to_string().len();
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for record in &self.records {
            for (i, field) in record.fields.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(field.chars().count());
                } else {
                    widths.push(field.chars().count());
                }
            }
        }

        let mut out = String::new();

        let mut header_line = " ".repeat(index_width);
        for (i, header) in self.headers.iter().enumerate() {
            header_line.push_str("  ");
            header_line.push_str(&pad(header, widths[i]));
        }
        out.push_str(header_line.trim_end());
        out.push('\n');

        for (idx, record) in self.records.iter().enumerate() {
            let mut line = format!("{idx:>width$}", width = index_width);
            for (i, field) in record.fields.iter().enumerate() {
                line.push_str("  ");
                line.push_str(&pad(field, widths.get(i).copied().unwrap_or(0)));
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }

        out
    }
}

/// Left-align `s` in a field of `width` characters (not bytes).
fn pad(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        s.to_string()
    } else {
        let mut padded = String::with_capacity(s.len() + width - len);
        padded.push_str(s);
        padded.push_str(&" ".repeat(width - len));
        padded
    }
}
