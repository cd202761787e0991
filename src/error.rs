use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Could not reach spreadsheet store: {0}")]
    ConnectionFailure(String),

    #[error("Unexpected table shape: {0}")]
    DataShape(String),

    #[error("Failed to format {range}: {reason}")]
    FormattingFailure { range: String, reason: String },

    #[error("Notification failed: {0}")]
    NotificationFailure(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Rate limit exceeded, please try again later")]
    RateLimited,

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}
