#![deny(unsafe_code)]

//! Field requirements per submission destination.
//!
//! BioSample requirements come from an attribute-package XML document; SRA,
//! GISAID, and the shared table use built-in lists.

pub mod biosample;
pub mod builtin;
pub mod error;

pub use crate::biosample::{UNKNOWN_FIELD, load_biosample_requirements, parse_biosample_requirements};
pub use crate::builtin::builtin_requirements;
pub use crate::error::StandardsError;
