use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },

    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type GenResult<T> = Result<T, GenError>;
