//! CLI library components for seqsub.

pub mod config;
pub mod logging;
