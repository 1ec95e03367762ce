//! The vehicle as seen by callers.

use chrono::{DateTime, Utc};
use common::{Condition, Details, Location, VehicleId};
use serde::{Deserialize, Serialize};
use vehicle_store::VehicleRecord;

/// A vehicle record together with its transient price and address.
///
/// `price` and `location.address` are only meaningful right after enrichment; neither
/// survives [`Vehicle::to_record`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(default)]
    pub id: Option<VehicleId>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub modified_at: Option<DateTime<Utc>>,
    pub details: Details,
    pub condition: Condition,
    pub location: Location,
    #[serde(default)]
    pub price: Option<String>,
}

impl Vehicle {
    /// Creates a vehicle that has not been stored yet.
    pub fn new(details: Details, condition: Condition, location: Location) -> Self {
        Self {
            id: None,
            created_at: None,
            modified_at: None,
            details,
            condition,
            location,
            price: None,
        }
    }

    pub fn with_id(mut self, id: VehicleId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }

    /// Returns the durable part of this vehicle.
    pub fn to_record(&self) -> VehicleRecord {
        VehicleRecord {
            id: self.id,
            created_at: self.created_at,
            modified_at: self.modified_at,
            details: self.details.clone(),
            condition: self.condition,
            coordinates: self.location.coordinates(),
        }
    }
}

impl From<VehicleRecord> for Vehicle {
    fn from(record: VehicleRecord) -> Self {
        Self {
            id: record.id,
            created_at: record.created_at,
            modified_at: record.modified_at,
            details: record.details,
            condition: record.condition,
            location: Location::from(record.coordinates),
            price: None,
        }
    }
}
