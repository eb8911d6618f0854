//! Specimen table transformations.
//!
//! - **mapping**: per-destination column renames and column prefixing
//! - **constants**: static metadata broadcast to every row
//! - **derived**: composite fields such as isolate names and locations
//!
//! Every function takes a borrowed frame and returns a new one.

pub mod constants;
pub mod derived;
pub mod error;
pub mod mapping;

pub use constants::{apply_constant, apply_static_metadata};
pub use derived::{
    DerivedField, DerivedFormat, apply_derived_field, apply_derived_fields, collection_year,
};
pub use error::{Result, TransformError};
pub use mapping::{apply_column_map, prefix_columns};
