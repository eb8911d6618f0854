//! Input loading for the seqsub pipeline.
//!
//! - **specimen**: the tab-separated specimen table, as an all-text DataFrame
//! - **metadata**: the static metadata table and the repository column map

pub mod error;
pub mod metadata;
pub mod specimen;

pub use error::{IngestError, Result};
pub use metadata::{SOURCE_COLUMN, read_repository_column_map, read_static_metadata};
pub use specimen::{IngestOptions, parse_allow_list, read_specimen_table};
