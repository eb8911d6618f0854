use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown destination tag '{0}' (expected one of bs, sra, gs, gen)")]
    UnknownDestination(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
