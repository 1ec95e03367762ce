//! Vehicle service: CRUD over the vehicle store, enriched by the pricing and maps
//! services.

use clients::{MapsClient, PriceClient, PriceRecord};
use common::VehicleId;
use vehicle_store::{StoreError, VehicleRecord, VehicleStore};

use crate::error::{Result, VehicleError};
use crate::vehicle::Vehicle;

/// Service for managing vehicles.
///
/// Stored records never hold a price or a street address. Every read fetches both
/// again: the price from the pricing service, the address from the maps service.
/// Every write records the submitted price with the pricing service.
///
/// The service keeps no state of its own; all calls are awaited one after another and
/// any store or client failure is returned to the caller unchanged.
pub struct VehicleService<S, P, M>
where
    S: VehicleStore,
    P: PriceClient,
    M: MapsClient,
{
    store: S,
    prices: P,
    maps: M,
}

impl<S, P, M> VehicleService<S, P, M>
where
    S: VehicleStore,
    P: PriceClient,
    M: MapsClient,
{
    /// Creates a new vehicle service.
    pub fn new(store: S, prices: P, maps: M) -> Self {
        Self {
            store,
            prices,
            maps,
        }
    }

    /// Returns a reference to the underlying vehicle store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Lists every stored vehicle with a fresh price and address.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Vehicle>> {
        let records = self.store.find_all().await?;

        let mut vehicles = Vec::with_capacity(records.len());
        for record in records {
            let id = record.id.ok_or(StoreError::MissingId)?;
            vehicles.push(self.enrich(id, record).await?);
        }

        tracing::debug!(count = vehicles.len(), "vehicles listed");
        Ok(vehicles)
    }

    /// Gets a vehicle by id with a fresh price and address.
    #[tracing::instrument(skip(self))]
    pub async fn find_by_id(&self, id: VehicleId) -> Result<Vehicle> {
        let record = self.load(id).await?;
        self.enrich(id, record).await
    }

    /// Creates or updates a vehicle depending on whether it carries an id.
    ///
    /// Update: the submitted price is recorded first, then `details`, `location` and
    /// `condition` are copied onto the stored record. An unparseable price therefore
    /// leaves the stored vehicle untouched.
    ///
    /// Create: the vehicle is stored first to obtain its id, then its price is recorded
    /// under that id.
    #[tracing::instrument(skip(self, vehicle), fields(vehicle_id = ?vehicle.id))]
    pub async fn save(&self, vehicle: Vehicle) -> Result<Vehicle> {
        match vehicle.id {
            Some(id) => self.update(id, vehicle).await,
            None => self.create(vehicle).await,
        }
    }

    /// Parses `price` as an integer amount and records it for `vehicle_id` in the
    /// default currency, replacing any previous price.
    #[tracing::instrument(skip(self))]
    pub async fn save_price(&self, price: Option<&str>, vehicle_id: VehicleId) -> Result<()> {
        let amount = parse_price(price).inspect_err(|_| {
            metrics::counter!("vehicle_price_rejected_total").increment(1);
        })?;

        self.prices
            .save_price(PriceRecord::usd(amount, vehicle_id))
            .await?;
        Ok(())
    }

    /// Deletes a vehicle and its price.
    ///
    /// The price goes first. The two deletions are independent, so a failure in
    /// between leaves a price without a vehicle.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: VehicleId) -> Result<()> {
        let record = self.load(id).await?;

        self.prices.delete_price(id).await?;
        self.store.delete(&record).await?;

        metrics::counter!("vehicles_deleted_total").increment(1);
        tracing::info!(vehicle_id = %id, "vehicle deleted");
        Ok(())
    }

    async fn update(&self, id: VehicleId, vehicle: Vehicle) -> Result<Vehicle> {
        self.save_price(vehicle.price.as_deref(), id).await?;

        let mut existing = self.load(id).await?;
        existing.details = vehicle.details;
        existing.coordinates = vehicle.location.coordinates();
        existing.condition = vehicle.condition;

        let saved = self.store.save(existing).await?;
        metrics::counter!("vehicles_saved_total", "path" => "update").increment(1);
        tracing::info!(vehicle_id = %id, "vehicle updated");

        let mut updated = Vehicle::from(saved);
        updated.location = vehicle.location;
        Ok(updated)
    }

    async fn create(&self, vehicle: Vehicle) -> Result<Vehicle> {
        let saved = self.store.save(vehicle.to_record()).await?;
        let id = saved.id.ok_or(StoreError::MissingId)?;

        self.save_price(vehicle.price.as_deref(), id).await?;
        metrics::counter!("vehicles_saved_total", "path" => "create").increment(1);
        tracing::info!(vehicle_id = %id, "vehicle created");

        let mut created = Vehicle::from(saved);
        created.location = vehicle.location;
        created.price = vehicle.price;
        Ok(created)
    }

    async fn load(&self, id: VehicleId) -> Result<VehicleRecord> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(VehicleError::NotFound(id))
    }

    /// Overwrites the transient fields of a stored record with fresh values.
    async fn enrich(&self, id: VehicleId, record: VehicleRecord) -> Result<Vehicle> {
        let started = std::time::Instant::now();

        let mut vehicle = Vehicle::from(record);
        vehicle.price = Some(self.prices.get_price(id).await?);
        vehicle.location = self.maps.get_address(vehicle.location).await?;

        metrics::histogram!("vehicle_enrichment_duration_seconds")
            .record(started.elapsed().as_secs_f64());
        Ok(vehicle)
    }
}

fn parse_price(price: Option<&str>) -> Result<i64> {
    let value = price.unwrap_or_default();
    value.parse().map_err(|_| VehicleError::InvalidPrice {
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clients::{InMemoryMapsClient, InMemoryPriceClient};
    use common::{Condition, Details, Location, Manufacturer};
    use vehicle_store::InMemoryVehicleStore;

    type TestService =
        VehicleService<InMemoryVehicleStore, InMemoryPriceClient, InMemoryMapsClient>;

    fn create_service() -> (TestService, InMemoryPriceClient) {
        let prices = InMemoryPriceClient::new();
        let service = VehicleService::new(
            InMemoryVehicleStore::new(),
            prices.clone(),
            InMemoryMapsClient::new(),
        );
        (service, prices)
    }

    fn new_vehicle(price: &str) -> Vehicle {
        Vehicle::new(
            Details::new("sedan", "Impala", Manufacturer::new(101, "Chevrolet")),
            Condition::Used,
            Location::new(40.73, -73.99),
        )
        .with_price(price)
    }

    #[test]
    fn test_parse_price_accepts_integers() {
        assert_eq!(parse_price(Some("15000")).unwrap(), 15000);
        assert_eq!(parse_price(Some("+12")).unwrap(), 12);
        assert_eq!(parse_price(Some("-3")).unwrap(), -3);
    }

    #[test]
    fn test_parse_price_rejects_non_integers() {
        for bad in ["abc", "12.50", " 100", "", "99999999999999999999"] {
            let err = parse_price(Some(bad)).unwrap_err();
            assert!(
                matches!(&err, VehicleError::InvalidPrice { value } if value == bad),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_price_rejects_missing_price() {
        assert!(matches!(
            parse_price(None),
            Err(VehicleError::InvalidPrice { .. })
        ));
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_records_price() {
        let (service, prices) = create_service();

        let created = service.save(new_vehicle("15000")).await.unwrap();

        assert_eq!(created.id, Some(VehicleId::new(1)));
        assert_eq!(created.price.as_deref(), Some("15000"));
        let price = prices.price_for(VehicleId::new(1)).unwrap();
        assert_eq!(price.currency, "USD");
        assert_eq!(price.display_amount(), "15000");
    }

    #[tokio::test]
    async fn test_find_by_id_enriches() {
        let (service, _) = create_service();
        service.save(new_vehicle("15000")).await.unwrap();

        let vehicle = service.find_by_id(VehicleId::new(1)).await.unwrap();

        assert_eq!(vehicle.price.as_deref(), Some("15000"));
        assert!(vehicle.location.address.is_some());
    }

    #[tokio::test]
    async fn test_find_by_id_missing() {
        let (service, _) = create_service();

        let err = service.find_by_id(VehicleId::new(1)).await.unwrap_err();
        assert!(matches!(err, VehicleError::NotFound(id) if id == VehicleId::new(1)));
    }

    #[tokio::test]
    async fn test_update_rejects_bad_price_without_mutation() {
        let (service, _) = create_service();
        service.save(new_vehicle("15000")).await.unwrap();

        let mut change = new_vehicle("abc").with_id(VehicleId::new(1));
        change.condition = Condition::New;
        let err = service.save(change).await.unwrap_err();

        assert!(matches!(err, VehicleError::InvalidPrice { .. }));
        let stored = service.find_by_id(VehicleId::new(1)).await.unwrap();
        assert_eq!(stored.condition, Condition::Used);
        assert_eq!(stored.price.as_deref(), Some("15000"));
    }

    #[tokio::test]
    async fn test_delete_removes_vehicle_and_price() {
        let (service, prices) = create_service();
        service.save(new_vehicle("15000")).await.unwrap();

        service.delete(VehicleId::new(1)).await.unwrap();

        assert!(prices.price_for(VehicleId::new(1)).is_none());
        assert!(matches!(
            service.find_by_id(VehicleId::new(1)).await,
            Err(VehicleError::NotFound(_))
        ));
    }
}
