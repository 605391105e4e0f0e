pub mod errors;
pub mod memory;
pub mod parking_spot_repo;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Page, PageRequest, ParkingSpot};

pub use errors::RepositoryError;
pub use memory::InMemoryParkingSpotRepository;
pub use parking_spot_repo::PgParkingSpotRepository;

/// Persistence operations for parking spots.
///
/// Implementations enforce the three unique constraints themselves and report
/// a violation as [`RepositoryError::UniqueViolation`] with the constraint name.
#[async_trait]
pub trait ParkingSpotRepository: Send + Sync {
    async fn create(&self, spot: &ParkingSpot) -> Result<ParkingSpot, RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ParkingSpot>, RepositoryError>;

    async fn find_page(&self, request: &PageRequest) -> Result<Page<ParkingSpot>, RepositoryError>;

    async fn exists_by_license_plate_car(&self, license_plate_car: &str) -> Result<bool, RepositoryError>;

    async fn exists_by_parking_spot_number(&self, parking_spot_number: &str) -> Result<bool, RepositoryError>;

    async fn exists_by_apartment_and_block(
        &self,
        apartment: &str,
        block: &str,
    ) -> Result<bool, RepositoryError>;

    /// Replaces the row with the same id. Fails with `Missing` if there is none.
    async fn update(&self, spot: &ParkingSpot) -> Result<ParkingSpot, RepositoryError>;

    async fn delete(&self, spot: &ParkingSpot) -> Result<(), RepositoryError>;
}
