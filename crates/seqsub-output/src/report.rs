//! Exclusion report output.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use seqsub_model::ExclusionReport;

use crate::error::{OutputError, Result};

/// Writes the per-destination exclusion reports as pretty-printed JSON.
pub fn write_exclusion_report_json(reports: &[ExclusionReport], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        crate::table::ensure_dir(parent)?;
    }
    let file = File::create(path).map_err(|e| OutputError::write(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, reports).map_err(|source| OutputError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    writer
        .write_all(b"\n")
        .and_then(|()| writer.flush())
        .map_err(|e| OutputError::write(path, e))?;
    debug!(path = %path.display(), destinations = reports.len(), "wrote exclusion report");
    Ok(())
}
