use thiserror::Error;

use crate::VehicleId;

/// Errors that can occur when interacting with the vehicle store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored row could not be decoded into a vehicle record.
    #[error("Corrupt vehicle record {id}: {reason}")]
    Corrupt { id: VehicleId, reason: String },

    /// The store handed back a record it never assigned an id to.
    #[error("Stored vehicle record has no id")]
    MissingId,

    /// Every id the store can hand out has been used.
    #[error("Vehicle id sequence exhausted")]
    SequenceExhausted,
}

/// Result type for vehicle store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
