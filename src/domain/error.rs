use thiserror::Error;

/// Failures surfaced by slot operations.
///
/// "No slot available" is deliberately absent: it is an ordinary
/// [`Allocation::Unavailable`](crate::domain::Allocation) outcome.
#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Invalid slot number.")]
    InvalidSlotNumber(String),

    #[error("Slot number must be positive.")]
    NonPositiveSlotNumber(i64),

    #[error("Slot {0} already exists.")]
    Conflict(i64),

    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl SlotError {
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SlotError::InvalidSlotNumber(_) | SlotError::NonPositiveSlotNumber(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SlotError>;
