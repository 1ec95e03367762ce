//! Domain error types.

use clients::ClientError;
use common::VehicleId;
use thiserror::Error;
use vehicle_store::StoreError;

/// Errors that can occur during vehicle operations.
#[derive(Debug, Error)]
pub enum VehicleError {
    /// No vehicle is stored under the requested id.
    #[error("Vehicle not found: {0}")]
    NotFound(VehicleId),

    /// The submitted price is not an integer amount.
    #[error("Invalid price value: {value:?}")]
    InvalidPrice { value: String },

    /// An error occurred in the vehicle store.
    #[error("Vehicle store error: {0}")]
    Store(#[from] StoreError),

    /// An error occurred in the pricing or maps service.
    #[error("Service client error: {0}")]
    Client(#[from] ClientError),
}

/// Convenience type alias for vehicle operation results.
pub type Result<T> = std::result::Result<T, VehicleError>;
