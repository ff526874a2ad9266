use thiserror::Error;

/// Errors that can occur while loading transactions or building reports.
/// Malformed input lines are not errors here: the loader skips them.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV writing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("target month must be between 1 and 12, got {0}")]
    InvalidMonth(u32),

    #[error("transaction date {0} is outside the supported range")]
    InvalidTimestamp(i64),

    #[error("arithmetic overflow while {0}")]
    Overflow(&'static str),
}

pub type Result<T> = std::result::Result<T, ReportError>;
