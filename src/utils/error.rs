use thiserror::Error;

#[derive(Error, Debug)]
pub enum RsvpError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Spreadsheet API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Roster error: {message}")]
    RosterError { message: String },

    #[error("El máximo permitido para {group} es {ceiling}.")]
    QuotaExceeded {
        group: String,
        ceiling: u32,
        requested: u32,
    },

    #[error("Storage backend '{backend}' failed: {message}")]
    StorageError {
        backend: &'static str,
        message: String,
    },

    #[error("All confirmation backends failed, last error: {last_error}")]
    AllBackendsFailed { last_error: String },
}

pub type Result<T> = std::result::Result<T, RsvpError>;
