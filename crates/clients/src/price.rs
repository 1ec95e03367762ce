//! Pricing service trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::VehicleId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Currency code attached to every price this system records.
pub const DEFAULT_CURRENCY: &str = "USD";

/// A price quote owned by the pricing service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub currency: String,
    /// Sent as an exact decimal string; read back from a string or a JSON number.
    pub amount: Decimal,
    pub vehicle_id: VehicleId,
}

impl PriceRecord {
    /// Creates a price in the default currency.
    pub fn usd(amount: impl Into<Decimal>, vehicle_id: VehicleId) -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            amount: amount.into(),
            vehicle_id,
        }
    }

    /// Renders the amount the way vehicles carry it.
    pub fn display_amount(&self) -> String {
        self.amount.to_string()
    }
}

/// Trait for pricing service operations.
#[async_trait]
pub trait PriceClient: Send + Sync {
    /// Returns the current price quote for a vehicle.
    async fn get_price(&self, vehicle_id: VehicleId) -> Result<String, ClientError>;

    /// Stores a price, replacing any previous price for the same vehicle.
    async fn save_price(&self, price: PriceRecord) -> Result<(), ClientError>;

    /// Removes the price of a vehicle.
    async fn delete_price(&self, vehicle_id: VehicleId) -> Result<(), ClientError>;
}

#[derive(Debug, Default)]
struct InMemoryPriceState {
    prices: HashMap<VehicleId, PriceRecord>,
    delete_calls: usize,
    fail_on_get: bool,
    fail_on_save: bool,
}

/// In-memory pricing service for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPriceClient {
    state: Arc<RwLock<InMemoryPriceState>>,
}

impl InMemoryPriceClient {
    /// Creates a new in-memory pricing service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the service to fail every price lookup.
    pub fn set_fail_on_get(&self, fail: bool) {
        self.state.write().unwrap().fail_on_get = fail;
    }

    /// Configures the service to fail every price write.
    pub fn set_fail_on_save(&self, fail: bool) {
        self.state.write().unwrap().fail_on_save = fail;
    }

    /// Returns the stored price record for a vehicle, if any.
    pub fn price_for(&self, vehicle_id: VehicleId) -> Option<PriceRecord> {
        self.state.read().unwrap().prices.get(&vehicle_id).cloned()
    }

    /// Returns the number of stored prices.
    pub fn price_count(&self) -> usize {
        self.state.read().unwrap().prices.len()
    }

    /// Returns how many times `delete_price` has been called.
    pub fn delete_calls(&self) -> usize {
        self.state.read().unwrap().delete_calls
    }
}

#[async_trait]
impl PriceClient for InMemoryPriceClient {
    async fn get_price(&self, vehicle_id: VehicleId) -> Result<String, ClientError> {
        let state = self.state.read().unwrap();

        if state.fail_on_get {
            return Err(ClientError::Pricing("Pricing service unavailable".to_string()));
        }

        state
            .prices
            .get(&vehicle_id)
            .map(PriceRecord::display_amount)
            .ok_or_else(|| ClientError::Pricing(format!("No price for vehicle {vehicle_id}")))
    }

    async fn save_price(&self, price: PriceRecord) -> Result<(), ClientError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_save {
            return Err(ClientError::Pricing("Price rejected".to_string()));
        }

        state.prices.insert(price.vehicle_id, price);
        Ok(())
    }

    async fn delete_price(&self, vehicle_id: VehicleId) -> Result<(), ClientError> {
        let mut state = self.state.write().unwrap();
        state.delete_calls += 1;
        state.prices.remove(&vehicle_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_and_get_price() {
        let service = InMemoryPriceClient::new();
        let vehicle_id = VehicleId::new(1);

        service
            .save_price(PriceRecord::usd(15000, vehicle_id))
            .await
            .unwrap();

        assert_eq!(service.get_price(vehicle_id).await.unwrap(), "15000");
        assert_eq!(service.price_count(), 1);
        assert_eq!(
            service.price_for(vehicle_id).unwrap().currency,
            DEFAULT_CURRENCY
        );
    }

    #[tokio::test]
    async fn test_save_overwrites_previous_price() {
        let service = InMemoryPriceClient::new();
        let vehicle_id = VehicleId::new(1);

        service
            .save_price(PriceRecord::usd(15000, vehicle_id))
            .await
            .unwrap();
        service
            .save_price(PriceRecord::usd(9000, vehicle_id))
            .await
            .unwrap();

        assert_eq!(service.get_price(vehicle_id).await.unwrap(), "9000");
        assert_eq!(service.price_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_price_is_an_error() {
        let service = InMemoryPriceClient::new();

        let result = service.get_price(VehicleId::new(5)).await;
        assert!(matches!(result, Err(ClientError::Pricing(_))));
    }

    #[tokio::test]
    async fn test_delete_price() {
        let service = InMemoryPriceClient::new();
        let vehicle_id = VehicleId::new(1);
        service
            .save_price(PriceRecord::usd(15000, vehicle_id))
            .await
            .unwrap();

        service.delete_price(vehicle_id).await.unwrap();

        assert_eq!(service.price_count(), 0);
        assert_eq!(service.delete_calls(), 1);
    }

    #[test]
    fn test_large_amount_survives_json() {
        let price = PriceRecord::usd(9_007_199_254_740_993_i64, VehicleId::new(1));

        let json = serde_json::to_string(&price).unwrap();
        assert!(json.contains("\"amount\":\"9007199254740993\""));

        let parsed: PriceRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.display_amount(), "9007199254740993");
        assert_eq!(parsed, price);
    }

    #[test]
    fn test_amount_reads_from_json_number() {
        let parsed: PriceRecord =
            serde_json::from_str(r#"{"currency":"USD","amount":15000,"vehicle_id":2}"#).unwrap();

        assert_eq!(parsed.display_amount(), "15000");
        assert_eq!(parsed.vehicle_id, VehicleId::new(2));
    }

    #[tokio::test]
    async fn test_fail_on_get_and_save() {
        let service = InMemoryPriceClient::new();
        service.set_fail_on_save(true);

        let result = service
            .save_price(PriceRecord::usd(100, VehicleId::new(1)))
            .await;
        assert!(result.is_err());
        assert_eq!(service.price_count(), 0);

        service.set_fail_on_save(false);
        service
            .save_price(PriceRecord::usd(100, VehicleId::new(1)))
            .await
            .unwrap();
        service.set_fail_on_get(true);
        assert!(service.get_price(VehicleId::new(1)).await.is_err());
    }
}
