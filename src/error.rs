use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeyGridError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),

    #[error("Unmapped character 0x{byte:02x} at corpus offset {offset}")]
    UnmappedCharacter { byte: u8, offset: usize },

    #[error("Worker Pool Error: {0}")]
    WorkerPool(String),
}

pub type KgResult<T> = Result<T, KeyGridError>;
