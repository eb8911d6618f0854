//! CSV writers for destination tables and side files.

use std::fs;
use std::path::Path;

use csv::{QuoteStyle, Writer, WriterBuilder};
use polars::prelude::DataFrame;
use tracing::debug;

use seqsub_common::column_strings;

use crate::error::{OutputError, Result};

/// Creates a directory and its parents if needed.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| OutputError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        ensure_dir(parent)?;
    }
    Ok(())
}

fn open_writer(path: &Path, has_headers: bool, quoting: QuoteStyle) -> Result<Writer<fs::File>> {
    ensure_parent_dir(path)?;
    WriterBuilder::new()
        .has_headers(has_headers)
        .quote_style(quoting)
        .from_path(path)
        .map_err(|e| OutputError::csv(path, e))
}

/// Writes a frame as CSV with a header row. Nulls become empty fields.
pub fn write_frame_csv(df: &DataFrame, path: &Path) -> Result<()> {
    let mut writer = open_writer(path, true, QuoteStyle::Necessary)?;
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    writer
        .write_record(&names)
        .map_err(|e| OutputError::csv(path, e))?;

    let columns = names
        .iter()
        .map(|name| column_strings(df, name))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    for row in 0..df.height() {
        let record = columns
            .iter()
            .map(|values| values[row].as_deref().unwrap_or_default());
        writer
            .write_record(record)
            .map_err(|e| OutputError::csv(path, e))?;
    }
    writer.flush().map_err(|e| OutputError::write(path, e))?;
    debug!(path = %path.display(), rows = df.height(), columns = names.len(), "wrote table");
    Ok(())
}

/// Writes one value per line without a header, skipping nulls.
///
/// Values are written verbatim, never quoted, so each line is a usable path.
/// Returns the number of lines written.
pub fn write_value_list<'a, I>(values: I, path: &Path) -> Result<usize>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut writer = open_writer(path, false, QuoteStyle::Never)?;
    let mut written = 0usize;
    for value in values.into_iter().flatten() {
        writer
            .write_record([value])
            .map_err(|e| OutputError::csv(path, e))?;
        written += 1;
    }
    writer.flush().map_err(|e| OutputError::write(path, e))?;
    debug!(path = %path.display(), lines = written, "wrote value list");
    Ok(written)
}

/// Writes two-column rows without a header, skipping rows where either side
/// is null.
///
/// Returns the number of rows written.
pub fn write_pair_list<'a, I>(pairs: I, path: &Path) -> Result<usize>
where
    I: IntoIterator<Item = (Option<&'a str>, Option<&'a str>)>,
{
    let mut writer = open_writer(path, false, QuoteStyle::Necessary)?;
    let mut written = 0usize;
    for pair in pairs {
        let (Some(left), Some(right)) = pair else {
            continue;
        };
        writer
            .write_record([left, right])
            .map_err(|e| OutputError::csv(path, e))?;
        written += 1;
    }
    writer.flush().map_err(|e| OutputError::write(path, e))?;
    debug!(path = %path.display(), rows = written, "wrote pair list");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_value_list_skips_nulls() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("filepaths.csv");
        let written = write_value_list([Some("a.fastq"), None, Some("b.fastq")], &path).unwrap();
        assert_eq!(written, 2);
        assert_eq!(fs::read_to_string(&path).unwrap(), "a.fastq\nb.fastq\n");
    }

    #[test]
    fn test_value_list_never_quotes_paths() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("filepaths.csv");
        write_value_list([Some("s1,R1.fastq.gz"), Some("s2 \"x\".fq")], &path).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "s1,R1.fastq.gz\ns2 \"x\".fq\n"
        );
    }

    #[test]
    fn test_pair_list_skips_incomplete_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("map.csv");
        let written = write_pair_list(
            [(Some("s1.fasta"), Some("hCoV-19/USA/1/2021")), (None, Some("x")), (Some("y"), None)],
            &path,
        )
        .unwrap();
        assert_eq!(written, 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), "s1.fasta,hCoV-19/USA/1/2021\n");
    }
}
