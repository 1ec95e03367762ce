//! HTTP implementations of the pricing and maps clients.
//!
//! Pricing service routes:
//! - `GET    {pricing}/prices/{vehicle_id}` returns a [`PriceRecord`]
//! - `PUT    {pricing}/prices/{vehicle_id}` stores a [`PriceRecord`]
//! - `DELETE {pricing}/prices/{vehicle_id}`
//!
//! Maps service routes:
//! - `GET {maps}/maps?lat={lat}&lon={lon}` returns an [`Address`]

use async_trait::async_trait;
use common::{Address, Location, VehicleId};
use reqwest::Client;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::maps::MapsClient;
use crate::price::{PriceClient, PriceRecord};

/// Pricing service client speaking JSON over HTTP.
#[derive(Debug, Clone)]
pub struct HttpPriceClient {
    client: Client,
    endpoint: String,
}

impl HttpPriceClient {
    /// Creates a client for the pricing service at `endpoint`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    /// Creates a client reusing an existing connection pool.
    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        }
    }

    /// Creates a client for the configured pricing endpoint.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.pricing_endpoint.clone())
    }

    fn price_url(&self, vehicle_id: VehicleId) -> String {
        format!("{}/prices/{}", self.endpoint, vehicle_id)
    }
}

#[async_trait]
impl PriceClient for HttpPriceClient {
    #[tracing::instrument(skip(self))]
    async fn get_price(&self, vehicle_id: VehicleId) -> Result<String, ClientError> {
        let price: PriceRecord = self
            .client
            .get(self.price_url(vehicle_id))
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .inspect_err(|e| tracing::warn!(error = %e, "price lookup failed"))?
            .json()
            .await?;

        Ok(price.display_amount())
    }

    #[tracing::instrument(skip(self), fields(vehicle_id = %price.vehicle_id))]
    async fn save_price(&self, price: PriceRecord) -> Result<(), ClientError> {
        self.client
            .put(self.price_url(price.vehicle_id))
            .json(&price)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .inspect_err(|e| tracing::warn!(error = %e, "price write failed"))?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn delete_price(&self, vehicle_id: VehicleId) -> Result<(), ClientError> {
        self.client
            .delete(self.price_url(vehicle_id))
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .inspect_err(|e| tracing::warn!(error = %e, "price delete failed"))?;

        Ok(())
    }
}

/// Maps service client speaking JSON over HTTP.
#[derive(Debug, Clone)]
pub struct HttpMapsClient {
    client: Client,
    endpoint: String,
}

impl HttpMapsClient {
    /// Creates a client for the maps service at `endpoint`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    /// Creates a client reusing an existing connection pool.
    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        }
    }

    /// Creates a client for the configured maps endpoint.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.maps_endpoint.clone())
    }
}

#[async_trait]
impl MapsClient for HttpMapsClient {
    #[tracing::instrument(skip(self))]
    async fn get_address(&self, location: Location) -> Result<Location, ClientError> {
        let address: Address = self
            .client
            .get(format!("{}/maps", self.endpoint))
            .query(&[("lat", location.lat), ("lon", location.lon)])
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .inspect_err(|e| tracing::warn!(error = %e, "address lookup failed"))?
            .json()
            .await?;

        Ok(location.with_address(address))
    }
}
