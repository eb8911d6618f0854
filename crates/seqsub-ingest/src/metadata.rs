//! Static metadata table and repository column map loading.

use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, warn};

use seqsub_model::{Destination, RepositoryColumnMap, StaticMetadataEntry};

use crate::error::{IngestError, Result};

/// Column of the repository column map naming the specimen-table column.
pub const SOURCE_COLUMN: &str = "terra";

const STATIC_COLUMNS: [&str; 3] = ["db", "key", "value"];

fn require_columns(headers: &StringRecord, required: &[&str], path: &Path) -> Result<()> {
    for column in required {
        if !headers.iter().any(|header| header.trim() == *column) {
            return Err(IngestError::MissingColumn {
                column: (*column).to_string(),
                path: path.to_path_buf(),
            });
        }
    }
    Ok(())
}

/// Reads the static metadata table (`db`, `key`, `value`).
///
/// Entries whose `db` tag names no known destination are skipped with a
/// warning.
pub fn read_static_metadata(path: &Path) -> Result<Vec<StaticMetadataEntry>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_path(path)
        .map_err(|e| IngestError::open(path, e))?;
    let headers = reader
        .headers()
        .map_err(|e| IngestError::open(path, e))?
        .clone();
    require_columns(&headers, &STATIC_COLUMNS, path)?;

    let mut entries = Vec::new();
    for record in reader.deserialize::<StaticMetadataEntry>() {
        let entry = record.map_err(|e| IngestError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        if entry.destination().is_none() {
            warn!(
                path = %path.display(),
                db = %entry.db,
                key = %entry.key,
                "skipping static metadata entry for unknown destination"
            );
            continue;
        }
        entries.push(entry);
    }
    debug!(path = %path.display(), entries = entries.len(), "loaded static metadata");
    Ok(entries)
}

/// Reads the repository column map.
///
/// The `terra` column names the specimen-table column; each destination
/// column (`biosample`, `sra`, `gisaid`, `gen`) gives its target name. Blank
/// targets are ignored, and a destination column that is absent from the file
/// simply contributes no renames.
pub fn read_repository_column_map(path: &Path) -> Result<RepositoryColumnMap> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| IngestError::open(path, e))?;
    let headers = reader
        .headers()
        .map_err(|e| IngestError::open(path, e))?
        .clone();
    require_columns(&headers, &[SOURCE_COLUMN], path)?;
    let position = |name: &str| headers.iter().position(|header| header == name);
    let source_idx = position(SOURCE_COLUMN).unwrap_or_default();

    let columns: Vec<(Destination, usize)> = Destination::ALL
        .into_iter()
        .filter_map(|destination| {
            let idx = position(destination.map_column());
            if idx.is_none() {
                debug!(
                    path = %path.display(),
                    column = destination.map_column(),
                    "column map has no column for destination"
                );
            }
            idx.map(|idx| (destination, idx))
        })
        .collect();

    let mut map = RepositoryColumnMap::new();
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        let source = record.get(source_idx).unwrap_or("");
        for (destination, idx) in &columns {
            let target = record.get(*idx).unwrap_or("");
            map.insert(*destination, source, target);
        }
    }
    if map.is_empty() {
        warn!(path = %path.display(), "column map defines no renames");
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_static_metadata_requires_columns() {
        let file = create_temp_csv("db,name,value\nbs,organism,x\n");
        let result = read_static_metadata(file.path());
        assert!(matches!(
            result,
            Err(IngestError::MissingColumn { ref column, .. }) if column == "key"
        ));
    }

    #[test]
    fn test_column_map_without_destination_column() {
        let file = create_temp_csv("terra,sra\nread1,file_1\n");
        let map = read_repository_column_map(file.path()).unwrap();
        assert_eq!(map.renames_for(Destination::Sra).len(), 1);
        assert!(map.renames_for(Destination::BioSample).is_empty());
    }
}
