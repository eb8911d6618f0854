//! Output writers.
//!
//! Destination tables are written as CSV with a header row and empty fields
//! for nulls. Side files (read paths, FASTA map) have no header.

pub mod error;
pub mod report;
pub mod table;

pub use error::{OutputError, Result};
pub use report::write_exclusion_report_json;
pub use table::{ensure_dir, write_frame_csv, write_pair_list, write_value_list};
