use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Page, PageRequest, ParkingSpot};
use crate::repository::{ParkingSpotRepository, RepositoryError};

const COLUMNS: &str = "id, parking_spot_number, license_plate_car, brand_car, model_car, \
                       color_car, registration_date, responsible_name, apartment, block";

/// `parking_spot` table in PostgreSQL. Writes run in their own transaction.
#[derive(Clone)]
pub struct PgParkingSpotRepository {
    pool: PgPool,
}

impl PgParkingSpotRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ParkingSpotRepository for PgParkingSpotRepository {
    async fn create(&self, spot: &ParkingSpot) -> Result<ParkingSpot, RepositoryError> {
        let query = format!(
            "INSERT INTO parking_spot ({COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {COLUMNS}"
        );

        let mut tx = self.pool.begin().await?;
        let created = sqlx::query_as::<_, ParkingSpot>(&query)
            .bind(spot.id)
            .bind(&spot.parking_spot_number)
            .bind(&spot.license_plate_car)
            .bind(&spot.brand_car)
            .bind(&spot.model_car)
            .bind(&spot.color_car)
            .bind(spot.registration_date)
            .bind(&spot.responsible_name)
            .bind(&spot.apartment)
            .bind(&spot.block)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ParkingSpot>, RepositoryError> {
        let query = format!("SELECT {COLUMNS} FROM parking_spot WHERE id = $1");
        let spot = sqlx::query_as::<_, ParkingSpot>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(spot)
    }

    async fn find_page(&self, request: &PageRequest) -> Result<Page<ParkingSpot>, RepositoryError> {
        // Column and direction come from closed enums, never from raw input.
        let query = format!(
            "SELECT {COLUMNS} FROM parking_spot ORDER BY {} {}, id ASC LIMIT $1 OFFSET $2",
            request.sort.property.column(),
            request.sort.direction.sql(),
        );

        let content = sqlx::query_as::<_, ParkingSpot>(&query)
            .bind(i64::from(request.size))
            .bind(request.offset() as i64)
            .fetch_all(&self.pool)
            .await?;
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM parking_spot")
            .fetch_one(&self.pool)
            .await?;

        Ok(Page::new(content, request, total.max(0) as u64))
    }

    async fn exists_by_license_plate_car(&self, license_plate_car: &str) -> Result<bool, RepositoryError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM parking_spot WHERE license_plate_car = $1)",
        )
        .bind(license_plate_car)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn exists_by_parking_spot_number(&self, parking_spot_number: &str) -> Result<bool, RepositoryError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM parking_spot WHERE parking_spot_number = $1)",
        )
        .bind(parking_spot_number)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn exists_by_apartment_and_block(
        &self,
        apartment: &str,
        block: &str,
    ) -> Result<bool, RepositoryError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM parking_spot WHERE apartment = $1 AND block = $2)",
        )
        .bind(apartment)
        .bind(block)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn update(&self, spot: &ParkingSpot) -> Result<ParkingSpot, RepositoryError> {
        let query = format!(
            "UPDATE parking_spot SET parking_spot_number = $1, license_plate_car = $2, brand_car = $3, \
             model_car = $4, color_car = $5, responsible_name = $6, apartment = $7, block = $8 \
             WHERE id = $9 RETURNING {COLUMNS}"
        );

        let mut tx = self.pool.begin().await?;
        let updated = sqlx::query_as::<_, ParkingSpot>(&query)
            .bind(&spot.parking_spot_number)
            .bind(&spot.license_plate_car)
            .bind(&spot.brand_car)
            .bind(&spot.model_car)
            .bind(&spot.color_car)
            .bind(&spot.responsible_name)
            .bind(&spot.apartment)
            .bind(&spot.block)
            .bind(spot.id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(RepositoryError::Missing(spot.id))?;
        tx.commit().await?;

        Ok(updated)
    }

    async fn delete(&self, spot: &ParkingSpot) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("DELETE FROM parking_spot WHERE id = $1")
            .bind(spot.id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::Missing(spot.id));
        }
        tx.commit().await?;
        Ok(())
    }
}
