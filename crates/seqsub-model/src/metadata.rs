//! Static metadata entries and the repository column map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::destination::Destination;

/// One row of the static metadata table: a constant `value` written into
/// column `key` for every row of the destination named by `db`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticMetadataEntry {
    pub db: String,
    pub key: String,
    pub value: String,
}

impl StaticMetadataEntry {
    pub fn new(db: impl Into<String>, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn destination(&self) -> Option<Destination> {
        Destination::from_tag(&self.db)
    }

    /// Entries for one destination, in declaration order.
    pub fn for_destination(
        entries: &[StaticMetadataEntry],
        destination: Destination,
    ) -> Vec<&StaticMetadataEntry> {
        entries
            .iter()
            .filter(|entry| entry.destination() == Some(destination))
            .collect()
    }
}

/// A single source → target column rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRename {
    pub source: String,
    pub target: String,
}

/// Per-destination column renames, in map order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryColumnMap {
    renames: BTreeMap<Destination, Vec<ColumnRename>>,
}

impl RepositoryColumnMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a rename; blank targets or sources are ignored.
    pub fn insert(&mut self, destination: Destination, source: &str, target: &str) {
        let source = source.trim();
        let target = target.trim();
        if source.is_empty() || target.is_empty() {
            return;
        }
        let renames = self.renames.entry(destination).or_default();
        // A repeated source keeps its latest target.
        renames.retain(|rename| rename.source != source);
        renames.push(ColumnRename {
            source: source.to_string(),
            target: target.to_string(),
        });
    }

    pub fn renames_for(&self, destination: Destination) -> &[ColumnRename] {
        self.renames
            .get(&destination)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.renames.values().all(Vec::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_targets_are_dropped() {
        let mut map = RepositoryColumnMap::new();
        map.insert(Destination::Sra, "read1", "file_1");
        map.insert(Destination::Sra, "read2", "  ");
        assert_eq!(map.renames_for(Destination::Sra).len(), 1);
        assert!(map.renames_for(Destination::Gisaid).is_empty());
    }

    #[test]
    fn test_map_with_only_blank_targets_is_empty() {
        let mut map = RepositoryColumnMap::new();
        assert!(map.is_empty());
        map.insert(Destination::Gisaid, "host", "");
        assert!(map.is_empty());
        map.insert(Destination::Gisaid, "host", "covv_host");
        assert!(!map.is_empty());
    }

    #[test]
    fn test_static_entries_filter_by_tag() {
        let entries = vec![
            StaticMetadataEntry::new("bs", "organism", "SARS-CoV-2"),
            StaticMetadataEntry::new("gs", "covv_type", "betacoronavirus"),
            StaticMetadataEntry::new("BS", "host", "Homo sapiens"),
        ];
        let bs = StaticMetadataEntry::for_destination(&entries, Destination::BioSample);
        assert_eq!(bs.len(), 2);
        assert_eq!(bs[1].key, "host");
    }
}
