use async_trait::async_trait;

use crate::{Result, VehicleId, VehicleRecord};

/// Core trait for vehicle store implementations.
///
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait VehicleStore: Send + Sync {
    /// Retrieves every stored vehicle, ordered by id.
    async fn find_all(&self) -> Result<Vec<VehicleRecord>>;

    /// Retrieves a vehicle by id.
    ///
    /// Returns None if no record is stored under that id.
    async fn find_by_id(&self, id: VehicleId) -> Result<Option<VehicleRecord>>;

    /// Persists a record.
    ///
    /// A record without an id is inserted and receives a fresh one. A record with an id
    /// overwrites whatever is stored under that id. `created_at` is kept from the
    /// existing row and `modified_at` is refreshed.
    async fn save(&self, record: VehicleRecord) -> Result<VehicleRecord>;

    /// Removes a record. Records that were never stored are ignored.
    async fn delete(&self, record: &VehicleRecord) -> Result<()>;
}

/// Extension trait providing convenience methods for vehicle stores.
#[async_trait]
pub trait VehicleStoreExt: VehicleStore {
    /// Checks if a vehicle is stored under the given id.
    async fn exists(&self, id: VehicleId) -> Result<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}

// Blanket implementation for all VehicleStore implementations
impl<T: VehicleStore + ?Sized> VehicleStoreExt for T {}
