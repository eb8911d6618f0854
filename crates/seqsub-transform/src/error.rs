use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("dataframe error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),
}

pub type Result<T> = std::result::Result<T, TransformError>;
