//! Domain layer for the vehicles service.
//!
//! This crate provides:
//! - `Vehicle`, the enriched view of a stored vehicle record
//! - `VehicleService`, which mediates between the vehicle store and the pricing and
//!   maps services
//! - `VehicleError`, the failures callers have to handle

pub mod error;
pub mod service;
pub mod vehicle;

pub use error::{Result, VehicleError};
pub use service::VehicleService;
pub use vehicle::Vehicle;
