use thiserror::Error;
use uuid::Uuid;

/// Failures raised by the schedule generator, date parser, and bucketing engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Malformed date string `{0}` (expected YYYY-MM-DD)")]
    MalformedDateString(String),
    #[error("Unsupported recurrence `{0}` (expected single, weekly or monthly)")]
    UnsupportedRecurrence(String),
    #[error("Payment event {0} has no due date")]
    EmptyDateOnEvent(Uuid),
}

/// Error type that captures persistence failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Payment event not found: {0}")]
    EventNotFound(Uuid),
    #[error("Storage lock poisoned")]
    Poisoned,
}
