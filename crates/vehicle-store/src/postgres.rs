use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{Condition, Coordinates, Details};
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::{Result, StoreError, VehicleId, VehicleRecord, store::VehicleStore};

const SELECT_COLUMNS: &str = "id, condition, details, lat, lon, created_at, modified_at";

/// Moves the id sequence up to `$1` unless it has already handed out that id or a later one.
const ADVANCE_SEQUENCE: &str = r#"
    SELECT setval(seq, $1)
    FROM (SELECT pg_get_serial_sequence('vehicles', 'id')::regclass AS seq) AS s
    WHERE $1 > COALESCE(pg_sequence_last_value(seq), 0)
"#;

/// PostgreSQL-backed vehicle store implementation.
#[derive(Clone)]
pub struct PostgresVehicleStore {
    pool: PgPool,
}

impl PostgresVehicleStore {
    /// Creates a new PostgreSQL vehicle store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }

    fn row_to_record(row: PgRow) -> Result<VehicleRecord> {
        let id = VehicleId::new(row.try_get("id")?);

        let condition: String = row.try_get("condition")?;
        let condition: Condition = condition.parse().map_err(|e| StoreError::Corrupt {
            id,
            reason: format!("{e}"),
        })?;

        let details_json: serde_json::Value = row.try_get("details")?;
        let details: Details = serde_json::from_value(details_json)?;

        Ok(VehicleRecord {
            id: Some(id),
            created_at: Some(row.try_get::<DateTime<Utc>, _>("created_at")?),
            modified_at: Some(row.try_get::<DateTime<Utc>, _>("modified_at")?),
            details,
            condition,
            coordinates: Coordinates::new(row.try_get("lat")?, row.try_get("lon")?),
        })
    }
}

#[async_trait]
impl VehicleStore for PostgresVehicleStore {
    async fn find_all(&self) -> Result<Vec<VehicleRecord>> {
        let rows = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM vehicles ORDER BY id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_record).collect()
    }

    async fn find_by_id(&self, id: VehicleId) -> Result<Option<VehicleRecord>> {
        let row: Option<PgRow> = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM vehicles WHERE id = $1"
        ))
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_record).transpose()
    }

    async fn save(&self, record: VehicleRecord) -> Result<VehicleRecord> {
        let details_json = serde_json::to_value(&record.details)?;

        let row = match record.id {
            None => {
                sqlx::query(&format!(
                    r#"
                    INSERT INTO vehicles (condition, details, lat, lon, created_at, modified_at)
                    VALUES ($1, $2, $3, $4, NOW(), NOW())
                    RETURNING {SELECT_COLUMNS}
                    "#
                ))
                .bind(record.condition.as_str())
                .bind(details_json)
                .bind(record.coordinates.lat)
                .bind(record.coordinates.lon)
                .fetch_one(&self.pool)
                .await?
            }
            Some(id) => {
                let mut tx = self.pool.begin().await?;

                // created_at is only written by the insert branch of the upsert
                let row = sqlx::query(&format!(
                    r#"
                    INSERT INTO vehicles (id, condition, details, lat, lon, created_at, modified_at)
                    VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
                    ON CONFLICT (id) DO UPDATE SET
                        condition = EXCLUDED.condition,
                        details = EXCLUDED.details,
                        lat = EXCLUDED.lat,
                        lon = EXCLUDED.lon,
                        modified_at = NOW()
                    RETURNING {SELECT_COLUMNS}
                    "#
                ))
                .bind(id.as_i64())
                .bind(record.condition.as_str())
                .bind(details_json)
                .bind(record.coordinates.lat)
                .bind(record.coordinates.lon)
                .fetch_one(&mut *tx)
                .await?;

                // Generated ids must stay ahead of explicitly keyed rows
                sqlx::query(ADVANCE_SEQUENCE)
                    .bind(id.as_i64())
                    .execute(&mut *tx)
                    .await?;

                tx.commit().await?;
                row
            }
        };

        let saved = Self::row_to_record(row)?;
        tracing::debug!(vehicle_id = ?saved.id, "vehicle record saved");
        Ok(saved)
    }

    async fn delete(&self, record: &VehicleRecord) -> Result<()> {
        let Some(id) = record.id else {
            return Ok(());
        };

        sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
