//! Run configuration from a TOML file and command-line overrides.
//!
//! ```toml
//! specimen_table = "specimens.tsv"
//! biosample_schema = "SARS-CoV-2.cl.1.0.xml"
//! static_metadata = "static_metadata.csv"
//! column_map = "repository_column_map.csv"
//! entity_id = "entity:sample_id"
//! destinations = ["bs", "sra", "gs"]
//! cloud_uri = "gs://bucket/reads/"
//! read_path_export = "basename"
//! output_dir = "submission"
//! ```
//!
//! Relative paths in the file are resolved against the file's directory.
//! Command-line values win over file values.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

use seqsub_core::{DEFAULT_ENTITY_ID, ReadPathExport, RunConfig};
use seqsub_model::DestinationSelection;

/// Output directory used when neither the file nor the flags name one.
pub const DEFAULT_OUTPUT_DIR: &str = "seqsub-output";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub specimen_table: Option<PathBuf>,
    pub biosample_schema: Option<PathBuf>,
    pub static_metadata: Option<PathBuf>,
    pub column_map: Option<PathBuf>,
    pub entity_id: Option<String>,
    pub destinations: Option<Vec<String>>,
    pub cloud_uri: Option<String>,
    pub read_path_export: Option<ReadPathExport>,
    pub output_dir: Option<PathBuf>,
    pub samples: Option<Vec<String>>,
}

impl FileConfig {
    /// Parses a TOML document. Paths are left as written.
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("parse run configuration")
    }

    /// Reads a config file and resolves its relative paths.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let config =
            Self::parse(&text).with_context(|| format!("in config {}", path.display()))?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(config.relative_to(base))
    }

    fn relative_to(mut self, base: &Path) -> Self {
        let resolve = |path: Option<PathBuf>| {
            path.map(|path| {
                if path.is_relative() {
                    base.join(path)
                } else {
                    path
                }
            })
        };
        self.specimen_table = resolve(self.specimen_table);
        self.biosample_schema = resolve(self.biosample_schema);
        self.static_metadata = resolve(self.static_metadata);
        self.column_map = resolve(self.column_map);
        self.output_dir = resolve(self.output_dir);
        self
    }
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct RunOverrides {
    pub specimen_table: Option<PathBuf>,
    pub biosample_schema: Option<PathBuf>,
    pub static_metadata: Option<PathBuf>,
    pub column_map: Option<PathBuf>,
    pub entity_id: Option<String>,
    pub destinations: Option<Vec<String>>,
    pub cloud_uri: Option<String>,
    pub read_path_export: Option<ReadPathExport>,
    pub output_dir: Option<PathBuf>,
    pub samples: Option<Vec<String>>,
    pub dry_run: bool,
}

fn required(value: Option<PathBuf>, flag: &str, key: &str) -> Result<PathBuf> {
    value.ok_or_else(|| anyhow!("missing {flag} (or `{key}` in the config file)"))
}

/// Merges command-line values over file values into a run configuration.
pub fn resolve_run_config(overrides: RunOverrides, file: FileConfig) -> Result<RunConfig> {
    let specimen_table = required(
        overrides.specimen_table.or(file.specimen_table),
        "--specimen-table",
        "specimen_table",
    )?;
    let static_metadata = required(
        overrides.static_metadata.or(file.static_metadata),
        "--static-metadata",
        "static_metadata",
    )?;
    let column_map = required(
        overrides.column_map.or(file.column_map),
        "--column-map",
        "column_map",
    )?;
    let output_dir = overrides
        .output_dir
        .or(file.output_dir)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

    let mut config = RunConfig::new(specimen_table, static_metadata, column_map, output_dir);
    config.biosample_schema = overrides.biosample_schema.or(file.biosample_schema);
    config.entity_id = overrides
        .entity_id
        .or(file.entity_id)
        .unwrap_or_else(|| DEFAULT_ENTITY_ID.to_string());
    if let Some(tags) = overrides.destinations.or(file.destinations) {
        config.selection =
            DestinationSelection::from_tags(&tags).context("parse destination selection")?;
    }
    config.cloud_uri = overrides
        .cloud_uri
        .or(file.cloud_uri)
        .filter(|uri| !uri.trim().is_empty());
    config.read_path_export = overrides
        .read_path_export
        .or(file.read_path_export)
        .unwrap_or_default();
    config.allow_list = overrides.samples.or(file.samples);
    config.dry_run = overrides.dry_run;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_paths_follow_config_dir() {
        let config = FileConfig {
            specimen_table: Some(PathBuf::from("specimens.tsv")),
            output_dir: Some(PathBuf::from("/abs/out")),
            ..FileConfig::default()
        }
        .relative_to(Path::new("/runs/batch1"));
        assert_eq!(
            config.specimen_table,
            Some(PathBuf::from("/runs/batch1/specimens.tsv"))
        );
        assert_eq!(config.output_dir, Some(PathBuf::from("/abs/out")));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(FileConfig::parse("specimen_tabel = \"x.tsv\"").is_err());
    }
}
