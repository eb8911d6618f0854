//! Mandatory-field validation for destination tables.
//!
//! Two kinds of gap are told apart:
//!
//! - **schema gap**: a mandatory field is not a column of the table at all.
//!   Reported once per destination; no rows are dropped for it.
//! - **row gap**: a row has a blank value in a mandatory column that exists.
//!   The row is excluded and recorded in the [`ExclusionReport`].
//!
//! [`ExclusionReport`]: seqsub_model::ExclusionReport

pub mod error;
pub mod required;

pub use error::{Result, ValidateError};
pub use required::{RequiredFieldCheck, normalize_blanks, validate_required};
