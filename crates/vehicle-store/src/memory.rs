use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{Result, StoreError, VehicleId, VehicleRecord, store::VehicleStore};

#[derive(Debug)]
struct InMemoryState {
    records: BTreeMap<VehicleId, VehicleRecord>,
    /// `None` once the id space is used up.
    next_id: Option<VehicleId>,
}

impl Default for InMemoryState {
    fn default() -> Self {
        Self {
            records: BTreeMap::new(),
            next_id: Some(VehicleId::new(1)),
        }
    }
}

/// In-memory vehicle store implementation for testing.
///
/// Ids are handed out sequentially starting at 1, like a database sequence.
/// Clones share the same underlying state.
#[derive(Clone, Default)]
pub struct InMemoryVehicleStore {
    state: Arc<RwLock<InMemoryState>>,
}

impl InMemoryVehicleStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored vehicles.
    pub async fn vehicle_count(&self) -> usize {
        self.state.read().await.records.len()
    }

    /// Removes every record. The id sequence is not reset.
    pub async fn clear(&self) {
        self.state.write().await.records.clear();
    }
}

#[async_trait]
impl VehicleStore for InMemoryVehicleStore {
    async fn find_all(&self) -> Result<Vec<VehicleRecord>> {
        let state = self.state.read().await;
        Ok(state.records.values().cloned().collect())
    }

    async fn find_by_id(&self, id: VehicleId) -> Result<Option<VehicleRecord>> {
        let state = self.state.read().await;
        Ok(state.records.get(&id).cloned())
    }

    async fn save(&self, mut record: VehicleRecord) -> Result<VehicleRecord> {
        let mut state = self.state.write().await;
        let now = Utc::now();

        let id = match record.id {
            Some(id) => {
                // Keep the sequence ahead of explicitly keyed inserts
                if state.next_id.is_some_and(|next| id >= next) {
                    state.next_id = id.next();
                }
                id
            }
            None => {
                let id = state.next_id.ok_or(StoreError::SequenceExhausted)?;
                state.next_id = id.next();
                id
            }
        };

        record.id = Some(id);
        record.created_at = state
            .records
            .get(&id)
            .and_then(|existing| existing.created_at)
            .or(Some(now));
        record.modified_at = Some(now);

        state.records.insert(id, record.clone());
        tracing::debug!(vehicle_id = %id, "vehicle record saved");

        Ok(record)
    }

    async fn delete(&self, record: &VehicleRecord) -> Result<()> {
        if let Some(id) = record.id {
            self.state.write().await.records.remove(&id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{Condition, Coordinates, Details, Manufacturer};

    fn sample_record() -> VehicleRecord {
        VehicleRecord::new(
            Details::new("sedan", "Impala", Manufacturer::new(101, "Chevrolet")),
            Condition::Used,
            Coordinates::new(40.73, -73.99),
        )
    }

    #[tokio::test]
    async fn save_assigns_sequential_ids() {
        let store = InMemoryVehicleStore::new();

        let first = store.save(sample_record()).await.unwrap();
        let second = store.save(sample_record()).await.unwrap();

        assert!(first.is_persisted());
        assert_eq!(first.id, Some(VehicleId::new(1)));
        assert_eq!(second.id, Some(VehicleId::new(2)));
        assert_eq!(store.vehicle_count().await, 2);
    }

    #[tokio::test]
    async fn save_with_id_overwrites_and_keeps_created_at() {
        let store = InMemoryVehicleStore::new();
        let saved = store.save(sample_record()).await.unwrap();

        let mut changed = saved.clone();
        changed.condition = Condition::New;
        changed.created_at = None;
        let updated = store.save(changed).await.unwrap();

        assert_eq!(updated.id, saved.id);
        assert_eq!(updated.created_at, saved.created_at);
        assert!(updated.modified_at >= saved.modified_at);
        assert_eq!(store.vehicle_count().await, 1);

        let stored = store.find_by_id(VehicleId::new(1)).await.unwrap().unwrap();
        assert_eq!(stored.condition, Condition::New);
    }

    #[tokio::test]
    async fn explicit_id_advances_the_sequence() {
        let store = InMemoryVehicleStore::new();

        let mut keyed = sample_record();
        keyed.id = Some(VehicleId::new(10));
        store.save(keyed).await.unwrap();

        let next = store.save(sample_record()).await.unwrap();
        assert_eq!(next.id, Some(VehicleId::new(11)));
    }

    #[tokio::test]
    async fn explicit_max_id_exhausts_the_sequence() {
        let store = InMemoryVehicleStore::new();

        let mut keyed = sample_record();
        keyed.id = Some(VehicleId::new(i64::MAX));
        let saved = store.save(keyed).await.unwrap();
        assert_eq!(saved.id, Some(VehicleId::new(i64::MAX)));

        let result = store.save(sample_record()).await;
        assert!(matches!(result, Err(StoreError::SequenceExhausted)));
        assert_eq!(store.vehicle_count().await, 1);

        // Explicitly keyed saves still work
        let mut keyed = sample_record();
        keyed.id = Some(VehicleId::new(5));
        store.save(keyed).await.unwrap();
        assert_eq!(store.vehicle_count().await, 2);
    }

    #[tokio::test]
    async fn clear_keeps_the_sequence() {
        let store = InMemoryVehicleStore::new();
        store.save(sample_record()).await.unwrap();
        store.save(sample_record()).await.unwrap();

        store.clear().await;
        assert_eq!(store.vehicle_count().await, 0);

        let next = store.save(sample_record()).await.unwrap();
        assert_eq!(next.id, Some(VehicleId::new(3)));
    }

    #[tokio::test]
    async fn find_all_is_ordered_by_id() {
        let store = InMemoryVehicleStore::new();
        for _ in 0..3 {
            store.save(sample_record()).await.unwrap();
        }

        let ids: Vec<_> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .filter_map(|r| r.id)
            .collect();
        assert_eq!(
            ids,
            vec![VehicleId::new(1), VehicleId::new(2), VehicleId::new(3)]
        );
    }

    #[tokio::test]
    async fn delete_removes_record() {
        let store = InMemoryVehicleStore::new();
        let saved = store.save(sample_record()).await.unwrap();

        store.delete(&saved).await.unwrap();

        assert!(store.find_by_id(VehicleId::new(1)).await.unwrap().is_none());
        assert_eq!(store.vehicle_count().await, 0);
    }

    #[tokio::test]
    async fn delete_unsaved_record_is_noop() {
        let store = InMemoryVehicleStore::new();
        store.save(sample_record()).await.unwrap();

        let unsaved = sample_record();
        assert!(!unsaved.is_persisted());
        store.delete(&unsaved).await.unwrap();

        assert_eq!(store.vehicle_count().await, 1);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = InMemoryVehicleStore::new();
        let handle = store.clone();

        store.save(sample_record()).await.unwrap();

        assert_eq!(handle.vehicle_count().await, 1);
    }
}
