//! Specimen table loading.
//!
//! The specimen table is a tab-separated export with one row per specimen.
//! Every cell is read as text; empty cells become nulls so that downstream
//! stages can tell a missing value from a present one.

use std::collections::BTreeSet;
use std::path::Path;

use csv::ReaderBuilder;
use polars::prelude::DataFrame;
use tracing::{debug, info};

use seqsub_common::frame_from_columns;

use crate::error::{IngestError, Result};

/// Options controlling how the specimen table is read.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Name of the identifier column (e.g. `entity:sample_id`).
    pub entity_id: String,
    /// Field delimiter, tab by default.
    pub delimiter: u8,
    /// When set, only rows whose identifier is listed are kept.
    pub allow_list: Option<Vec<String>>,
}

impl IngestOptions {
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            delimiter: b'\t',
            allow_list: None,
        }
    }

    #[must_use]
    pub fn with_allow_list(mut self, allow_list: Option<Vec<String>>) -> Self {
        self.allow_list = allow_list;
        self
    }
}

/// Splits a delimiter-joined list of identifiers, dropping blanks.
pub fn parse_allow_list(raw: &str, delimiter: char) -> Vec<String> {
    raw.split(delimiter)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

fn normalize_header(raw: &str) -> String {
    raw.trim_matches('\u{feff}').trim().to_string()
}

/// Reads the specimen table into an all-text DataFrame.
pub fn read_specimen_table(path: &Path, options: &IngestOptions) -> Result<DataFrame> {
    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| IngestError::open(path, e))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| IngestError::open(path, e))?
        .iter()
        .map(normalize_header)
        .collect();
    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err(IngestError::EmptyFile {
            path: path.to_path_buf(),
        });
    }
    let mut seen = BTreeSet::new();
    for header in &headers {
        if !seen.insert(header.as_str()) {
            return Err(IngestError::DuplicateColumn {
                column: header.clone(),
                path: path.to_path_buf(),
            });
        }
    }
    let Some(id_idx) = headers.iter().position(|h| h == &options.entity_id) else {
        return Err(IngestError::MissingColumn {
            column: options.entity_id.clone(),
            path: path.to_path_buf(),
        });
    };

    let allow: Option<BTreeSet<&str>> = options
        .allow_list
        .as_ref()
        .map(|ids| ids.iter().map(String::as_str).collect());

    let mut values: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
    let mut read = 0usize;
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        read += 1;
        if let Some(allow) = &allow {
            let id = record.get(id_idx).unwrap_or("").trim();
            if !allow.contains(id) {
                continue;
            }
        }
        for (idx, column) in values.iter_mut().enumerate() {
            let cell = record.get(idx).unwrap_or("");
            column.push(if cell.is_empty() {
                None
            } else {
                Some(cell.to_string())
            });
        }
    }

    let kept = values.first().map_or(0, Vec::len);
    if allow.is_some() {
        debug!(
            path = %path.display(),
            read,
            kept,
            "applied sample allow-list"
        );
    }
    info!(
        path = %path.display(),
        rows = kept,
        columns = headers.len(),
        "loaded specimen table"
    );

    let df = frame_from_columns(headers.into_iter().zip(values).collect())?;
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_tsv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_parse_allow_list() {
        assert_eq!(parse_allow_list("a, b,,c ", ','), vec!["a", "b", "c"]);
        assert!(parse_allow_list("", ',').is_empty());
    }

    #[test]
    fn test_empty_cells_become_null() {
        let file = create_temp_tsv("entity:s_id\tauthors\ns1\t\ns2\tDoe\n");
        let df = read_specimen_table(file.path(), &IngestOptions::new("entity:s_id")).unwrap();
        let authors = df.column("authors").unwrap().str().unwrap();
        assert_eq!(authors.get(0), None);
        assert_eq!(authors.get(1), Some("Doe"));
    }

    #[test]
    fn test_bom_is_stripped_from_header() {
        let file = create_temp_tsv("\u{feff}entity:s_id\tx\ns1\t1\n");
        let df = read_specimen_table(file.path(), &IngestOptions::new("entity:s_id")).unwrap();
        assert_eq!(df.height(), 1);
    }

    #[test]
    fn test_duplicate_header_is_rejected() {
        let file = create_temp_tsv("entity:s_id\tx\tx\ns1\t1\t2\n");
        let result = read_specimen_table(file.path(), &IngestOptions::new("entity:s_id"));
        assert!(matches!(result, Err(IngestError::DuplicateColumn { .. })));
    }
}
