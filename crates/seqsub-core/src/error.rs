use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("no destination selected; choose at least one of bs, sra, gs")]
    NoDestinationSelected,

    #[error("BioSample is selected but no attribute package document was given")]
    MissingBioSampleSchema,

    #[error(transparent)]
    Ingest(#[from] seqsub_ingest::IngestError),

    #[error(transparent)]
    Standards(#[from] seqsub_standards::StandardsError),

    #[error(transparent)]
    Transform(#[from] seqsub_transform::TransformError),

    #[error(transparent)]
    Validate(#[from] seqsub_validate::ValidateError),

    #[error(transparent)]
    Output(#[from] seqsub_output::OutputError),

    #[error("dataframe error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),
}

pub type Result<T> = std::result::Result<T, CoreError>;
