use std::sync::Arc;
use uuid::Uuid;

use crate::constants::{
    API_NAME, APARTMENT_BLOCK_IN_USE, LICENSE_PLATE_IN_USE, PARKING_SPOT_IN_USE, PARKING_SPOT_NOT_FOUND,
    UK_APARTMENT_BLOCK, UK_LICENSE_PLATE_CAR, UK_PARKING_SPOT_NUMBER,
};
use crate::error::AppError;
use crate::models::{Page, PageRequest, ParkingSpot};
use crate::repository::{ParkingSpotRepository, RepositoryError};

/// Message returned to the client when the store rejects a write on `constraint`.
pub fn conflict_message(constraint: &str) -> &'static str {
    match constraint {
        UK_LICENSE_PLATE_CAR => LICENSE_PLATE_IN_USE,
        UK_PARKING_SPOT_NUMBER => PARKING_SPOT_IN_USE,
        UK_APARTMENT_BLOCK => APARTMENT_BLOCK_IN_USE,
        _ => "Conflict: Parking Spot already exists!",
    }
}

fn map_write_error(err: RepositoryError) -> AppError {
    match err {
        RepositoryError::UniqueViolation { constraint } => {
            tracing::warn!("{} Store rejected write on constraint {}", API_NAME, constraint);
            AppError::Conflict(conflict_message(&constraint).to_string())
        }
        RepositoryError::Missing(_) => AppError::NotFound(PARKING_SPOT_NOT_FOUND.to_string()),
        other => AppError::Repository(other),
    }
}

#[derive(Clone)]
pub struct ParkingSpotService {
    repository: Arc<dyn ParkingSpotRepository>,
}

impl ParkingSpotService {
    pub fn new(repository: Arc<dyn ParkingSpotRepository>) -> Self {
        Self { repository }
    }

    pub async fn exists_by_license_plate_car(&self, license_plate_car: &str) -> Result<bool, AppError> {
        Ok(self.repository.exists_by_license_plate_car(license_plate_car).await?)
    }

    pub async fn exists_by_parking_spot_number(&self, parking_spot_number: &str) -> Result<bool, AppError> {
        Ok(self.repository.exists_by_parking_spot_number(parking_spot_number).await?)
    }

    pub async fn exists_by_apartment_and_block(&self, apartment: &str, block: &str) -> Result<bool, AppError> {
        Ok(self.repository.exists_by_apartment_and_block(apartment, block).await?)
    }

    /// Persists a new record. A unique violation raised by the store, e.g. when a
    /// concurrent request won the race after the existence checks, becomes a Conflict.
    pub async fn save(&self, spot: ParkingSpot) -> Result<ParkingSpot, AppError> {
        tracing::info!(
            "{} Saving parking spot {} for license plate {}",
            API_NAME,
            spot.parking_spot_number,
            spot.license_plate_car
        );

        let saved = self.repository.create(&spot).await.map_err(map_write_error)?;

        tracing::info!("{} Successfully saved parking spot: {}", API_NAME, saved.id);
        Ok(saved)
    }

    pub async fn update(&self, spot: ParkingSpot) -> Result<ParkingSpot, AppError> {
        tracing::info!("{} Updating parking spot: {}", API_NAME, spot.id);

        let updated = self.repository.update(&spot).await.map_err(map_write_error)?;

        tracing::info!("{} Successfully updated parking spot: {}", API_NAME, updated.id);
        Ok(updated)
    }

    pub async fn find_all(&self, request: &PageRequest) -> Result<Page<ParkingSpot>, AppError> {
        Ok(self.repository.find_page(request).await?)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ParkingSpot>, AppError> {
        Ok(self.repository.find_by_id(id).await?)
    }

    pub async fn delete(&self, spot: &ParkingSpot) -> Result<(), AppError> {
        tracing::info!("{} Deleting parking spot: {}", API_NAME, spot.id);

        self.repository.delete(spot).await.map_err(map_write_error)?;

        tracing::info!("{} Successfully deleted parking spot: {}", API_NAME, spot.id);
        Ok(())
    }
}
