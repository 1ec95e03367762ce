//! Geographic location values.
//!
//! Only [`Coordinates`] are durable. The street [`Address`] is resolved by the maps
//! service every time a vehicle is read, so it is kept out of the persisted shape.

use serde::{Deserialize, Serialize};

/// Latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Street address resolved for a pair of coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl Address {
    pub fn new(
        address: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        zip: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            city: city.into(),
            state: state.into(),
            zip: zip.into(),
        }
    }
}

/// Coordinates plus the address last resolved for them, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

impl Location {
    /// Creates a location with no resolved address.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            address: None,
        }
    }

    /// Returns a copy of this location carrying the given address.
    pub fn with_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    /// Returns the durable part of this location.
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lon)
    }
}

impl From<Coordinates> for Location {
    fn from(coordinates: Coordinates) -> Self {
        Self::new(coordinates.lat, coordinates.lon)
    }
}
