use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("dataframe error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    #[error(transparent)]
    Transform(#[from] seqsub_transform::TransformError),
}

pub type Result<T> = std::result::Result<T, ValidateError>;
