//! Clients for the two services that enrich vehicle records.
//!
//! - The pricing service owns the current price quote of every vehicle.
//! - The maps service resolves coordinates into a street address.
//!
//! Each service is exposed as a trait with an in-memory implementation for tests and an
//! HTTP implementation for real deployments.

pub mod config;
pub mod error;
pub mod http;
pub mod maps;
pub mod price;

pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use http::{HttpMapsClient, HttpPriceClient};
pub use maps::{InMemoryMapsClient, MapsClient};
pub use price::{DEFAULT_CURRENCY, InMemoryPriceClient, PriceClient, PriceRecord};
