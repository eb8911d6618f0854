//! SRA read-file handling.
//!
//! Read-file columns are processed in three steps:
//!
//! 1. values are normalized to their base filename;
//! 2. the list exported to `filepaths.csv` is taken, `file_1` values first
//!    and then `file_2` values, nulls skipped;
//! 3. when a cloud URI prefix is configured, the in-table value becomes
//!    `<uri><basename>`.
//!
//! [`ReadPathExport`] selects whether step 2 captures the basename or the
//! rewritten value. Either way the exported list never carries the local
//! directory of the original path.

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use tracing::debug;

use seqsub_common::{column_strings, string_column};
use seqsub_model::Destination;

use crate::error::Result;

/// Read-file columns, in export order.
pub const READ_FILE_COLUMNS: [&str; 2] = ["file_1", "file_2"];

/// Which value of a read-file path is written to `filepaths.csv`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadPathExport {
    /// The base filename.
    #[default]
    Basename,
    /// The value after the cloud URI prefix is applied.
    Rewritten,
}

/// Last `/`-separated segment of a path.
pub fn read_file_basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// SRA table with rewritten read-file columns and the exported path list.
#[derive(Debug, Clone)]
pub struct ReadFiles {
    pub table: DataFrame,
    pub export: Vec<String>,
}

/// Applies the read-file steps to a prefixed SRA table.
pub fn process_read_files(
    table: &DataFrame,
    cloud_uri: Option<&str>,
    export: ReadPathExport,
) -> Result<ReadFiles> {
    let cloud_uri = cloud_uri.map(str::trim).filter(|uri| !uri.is_empty());
    let mut out = table.clone();
    let mut exported = Vec::new();

    for column in READ_FILE_COLUMNS {
        let name = Destination::Sra.prefixed(column);
        if out.column(&name).is_err() {
            continue;
        }
        let mut rewritten = Vec::with_capacity(out.height());
        for value in column_strings(&out, &name)? {
            let Some(value) = value else {
                rewritten.push(None);
                continue;
            };
            let basename = read_file_basename(&value).to_string();
            let in_table = match cloud_uri {
                Some(uri) => format!("{uri}{basename}"),
                None => basename.clone(),
            };
            exported.push(match export {
                ReadPathExport::Basename => basename,
                ReadPathExport::Rewritten => in_table.clone(),
            });
            rewritten.push(Some(in_table));
        }
        out.with_column(string_column(&name, rewritten))?;
    }

    debug!(
        paths = exported.len(),
        cloud_uri = cloud_uri.unwrap_or_default(),
        "processed SRA read files"
    );
    Ok(ReadFiles {
        table: out,
        export: exported,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use seqsub_common::frame_from_columns;

    fn sra_table() -> DataFrame {
        frame_from_columns(vec![
            (
                "sra-file_1".to_string(),
                vec![Some("/data/run/s1_R1.fastq.gz".to_string()), Some("s2_R1.fastq.gz".to_string())],
            ),
            (
                "sra-file_2".to_string(),
                vec![Some("/data/run/s1_R2.fastq.gz".to_string()), None],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_basename() {
        assert_eq!(read_file_basename("/a/b/c.fastq"), "c.fastq");
        assert_eq!(read_file_basename("c.fastq"), "c.fastq");
        assert_eq!(read_file_basename("gs://bucket/dir/c.fastq"), "c.fastq");
    }

    #[test]
    fn test_export_order_and_nulls() {
        let files = process_read_files(&sra_table(), None, ReadPathExport::Basename).unwrap();
        assert_eq!(
            files.export,
            vec!["s1_R1.fastq.gz", "s2_R1.fastq.gz", "s1_R2.fastq.gz"]
        );
        let file_2 = files.table.column("sra-file_2").unwrap().str().unwrap();
        assert_eq!(file_2.get(1), None);
    }

    #[test]
    fn test_rewritten_export_uses_uri() {
        let files =
            process_read_files(&sra_table(), Some("gs://bucket/"), ReadPathExport::Rewritten).unwrap();
        assert_eq!(files.export[0], "gs://bucket/s1_R1.fastq.gz");
    }

    #[test]
    fn test_blank_uri_is_ignored() {
        let files = process_read_files(&sra_table(), Some("  "), ReadPathExport::Basename).unwrap();
        let file_1 = files.table.column("sra-file_1").unwrap().str().unwrap();
        assert_eq!(file_1.get(0), Some("s1_R1.fastq.gz"));
    }
}
