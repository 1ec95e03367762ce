pub mod config;
pub mod error;
pub mod memory;
pub mod postgres;
pub mod record;
pub mod store;

pub use common::VehicleId;
pub use config::StoreConfig;
pub use error::{Result, StoreError};
pub use memory::InMemoryVehicleStore;
pub use postgres::PostgresVehicleStore;
pub use record::VehicleRecord;
pub use store::{VehicleStore, VehicleStoreExt};
