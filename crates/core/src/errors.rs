use thiserror::Error;

#[derive(Error, Debug)]
pub enum ErpError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Invalid time slot {id}: {reason}")]
    InvalidTimeSlot { id: i64, reason: String },

    #[error("Course still has time slots: {0}")]
    CourseHasTimeSlots(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Storage error: {0}")]
    Storage(#[from] eyre::Report),

    #[error("Internal error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl ErpError {
    pub fn invalid_slot(id: i64, reason: impl Into<String>) -> Self {
        ErpError::InvalidTimeSlot {
            id,
            reason: reason.into(),
        }
    }
}

pub type ErpResult<T> = Result<T, ErpError>;
