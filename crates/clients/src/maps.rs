//! Maps service trait and in-memory implementation.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::{Address, Location};

use crate::error::ClientError;

/// Trait for reverse geocoding operations.
#[async_trait]
pub trait MapsClient: Send + Sync {
    /// Returns a copy of `location` with its street address resolved.
    async fn get_address(&self, location: Location) -> Result<Location, ClientError>;
}

#[derive(Debug)]
struct InMemoryMapsState {
    address: Address,
    lookups: usize,
    fail_on_lookup: bool,
}

impl Default for InMemoryMapsState {
    fn default() -> Self {
        Self {
            address: Address::new("777 Brockton Avenue", "Abington", "MA", "2351"),
            lookups: 0,
            fail_on_lookup: false,
        }
    }
}

/// In-memory maps service for testing.
///
/// Resolves every location to the same configurable address.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMapsClient {
    state: Arc<RwLock<InMemoryMapsState>>,
}

impl InMemoryMapsClient {
    /// Creates a new in-memory maps service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the address returned by subsequent lookups.
    pub fn set_address(&self, address: Address) {
        self.state.write().unwrap().address = address;
    }

    /// Configures the service to fail every lookup.
    pub fn set_fail_on_lookup(&self, fail: bool) {
        self.state.write().unwrap().fail_on_lookup = fail;
    }

    /// Returns the number of lookups served.
    pub fn lookup_count(&self) -> usize {
        self.state.read().unwrap().lookups
    }
}

#[async_trait]
impl MapsClient for InMemoryMapsClient {
    async fn get_address(&self, location: Location) -> Result<Location, ClientError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_lookup {
            return Err(ClientError::Maps("Maps service unavailable".to_string()));
        }

        state.lookups += 1;
        Ok(location.with_address(state.address.clone()))
    }
}
