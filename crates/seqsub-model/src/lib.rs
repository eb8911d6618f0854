//! Data model shared by the seqsub pipeline.
//!
//! - **destination**: the four submission targets and the run's selection
//! - **requirements**: mandatory/optional field lists per destination
//! - **metadata**: static metadata entries and the repository column map
//! - **exclusion**: per-destination report of schema gaps and excluded rows

pub mod destination;
pub mod error;
pub mod exclusion;
pub mod metadata;
pub mod requirements;

pub use destination::{Destination, DestinationSelection};
pub use error::{ModelError, Result};
pub use exclusion::{ExcludedSample, ExclusionReport};
pub use metadata::{ColumnRename, RepositoryColumnMap, StaticMetadataEntry};
pub use requirements::FieldRequirements;
