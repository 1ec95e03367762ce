use chrono::{DateTime, Utc};
use common::{Condition, Coordinates, Details};
use serde::{Deserialize, Serialize};

use crate::VehicleId;

/// The durable part of a vehicle.
///
/// Price and street address are not part of the record. Both are owned by external
/// services and are fetched again on every read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecord {
    /// Store-assigned key; `None` until the record is first saved.
    pub id: Option<VehicleId>,
    /// Set by the store on first insert.
    pub created_at: Option<DateTime<Utc>>,
    /// Set by the store on every save.
    pub modified_at: Option<DateTime<Utc>>,
    pub details: Details,
    pub condition: Condition,
    pub coordinates: Coordinates,
}

impl VehicleRecord {
    /// Creates an unsaved record.
    pub fn new(details: Details, condition: Condition, coordinates: Coordinates) -> Self {
        Self {
            id: None,
            created_at: None,
            modified_at: None,
            details,
            condition,
            coordinates,
        }
    }

    /// Returns true once the store has assigned an id.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}
