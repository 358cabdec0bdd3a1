use thiserror::Error;

#[derive(Error, Debug)]
pub enum QsoPartyError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Reference Data Error: {0}")]
    Reference(String),

    /// A validated log contradicted itself further down the pipeline.
    #[error("Internal Invariant Violated: {0}")]
    Invariant(String),

    #[error("Prepared Log Error: {0}")]
    Prepared(String),
}

pub type QpResult<T> = Result<T, QsoPartyError>;
