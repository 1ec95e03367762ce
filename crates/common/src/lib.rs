//! Shared value types for the vehicles workspace.

pub mod location;
pub mod types;
pub mod vehicle;

pub use location::{Address, Coordinates, Location};
pub use types::VehicleId;
pub use vehicle::{Condition, Details, Manufacturer, UnknownCondition};
