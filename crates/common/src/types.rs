use serde::{Deserialize, Serialize};

/// Identifier of a stored vehicle.
///
/// Assigned by the vehicle store on first insert and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(i64);

impl VehicleId {
    /// Wraps a raw store key.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw store key.
    pub fn as_i64(&self) -> i64 {
        self.0
    }

    /// Returns the id following this one, or `None` at the end of the id space.
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl std::fmt::Display for VehicleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for VehicleId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<VehicleId> for i64 {
    fn from(id: VehicleId) -> Self {
        id.0
    }
}
