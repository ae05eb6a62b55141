use thiserror::Error;

#[derive(Error, Debug)]
pub enum GoalplanError {
    #[error("Goal not found: {0}")]
    GoalNotFound(String),

    #[error("Unknown list: {0}")]
    UnknownList(String),

    #[error("Unknown review field: {0} (expected 'date' or 'comment')")]
    UnknownReviewField(String),

    #[error("Unknown weekday: {0}")]
    UnknownWeekday(String),

    #[error("Use --force to delete in non-interactive mode")]
    ConfirmationRequired,

    #[error("Import failed: {0}")]
    Import(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GoalplanError>;
