//! Shared utilities for seqsub crates.
//!
//! Every specimen table in the workspace is a Polars `DataFrame` whose columns
//! are all `String` typed, with nulls standing in for missing cells. This crate
//! holds the small helpers that read and build such frames.

pub mod frame;

pub use frame::{any_to_string, column_strings, frame_from_columns, is_blank, string_column};
