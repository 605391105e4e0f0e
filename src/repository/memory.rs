use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::constants::{UK_APARTMENT_BLOCK, UK_LICENSE_PLATE_CAR, UK_PARKING_SPOT_NUMBER};
use crate::models::{Page, PageRequest, ParkingSpot};
use crate::repository::{ParkingSpotRepository, RepositoryError};

/// Process-local store with the same unique constraints as the `parking_spot`
/// table. Constraint checks and writes happen under one write lock.
#[derive(Clone, Default)]
pub struct InMemoryParkingSpotRepository {
    spots: Arc<RwLock<BTreeMap<Uuid, ParkingSpot>>>,
}

impl InMemoryParkingSpotRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.spots.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.spots.read().await.is_empty()
    }
}

fn violated_constraint(spots: &BTreeMap<Uuid, ParkingSpot>, candidate: &ParkingSpot) -> Option<&'static str> {
    let id = candidate.id;
    let others = move || spots.values().filter(move |s| s.id != id);

    if others().any(|s| s.license_plate_car == candidate.license_plate_car) {
        return Some(UK_LICENSE_PLATE_CAR);
    }
    if others().any(|s| s.parking_spot_number == candidate.parking_spot_number) {
        return Some(UK_PARKING_SPOT_NUMBER);
    }
    if others().any(|s| s.apartment == candidate.apartment && s.block == candidate.block) {
        return Some(UK_APARTMENT_BLOCK);
    }
    None
}

#[async_trait]
impl ParkingSpotRepository for InMemoryParkingSpotRepository {
    async fn create(&self, spot: &ParkingSpot) -> Result<ParkingSpot, RepositoryError> {
        let mut spots = self.spots.write().await;
        if spots.contains_key(&spot.id) {
            return Err(RepositoryError::unique_violation("parking_spot_pkey"));
        }
        if let Some(constraint) = violated_constraint(&spots, spot) {
            return Err(RepositoryError::unique_violation(constraint));
        }
        spots.insert(spot.id, spot.clone());
        Ok(spot.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ParkingSpot>, RepositoryError> {
        Ok(self.spots.read().await.get(&id).cloned())
    }

    async fn find_page(&self, request: &PageRequest) -> Result<Page<ParkingSpot>, RepositoryError> {
        let spots = self.spots.read().await;
        let mut all: Vec<&ParkingSpot> = spots.values().collect();
        all.sort_by(|a, b| request.compare(a, b));

        let content = all
            .into_iter()
            .skip(usize::try_from(request.offset()).unwrap_or(usize::MAX))
            .take(request.size as usize)
            .cloned()
            .collect();

        Ok(Page::new(content, request, spots.len() as u64))
    }

    async fn exists_by_license_plate_car(&self, license_plate_car: &str) -> Result<bool, RepositoryError> {
        let spots = self.spots.read().await;
        Ok(spots.values().any(|s| s.license_plate_car == license_plate_car))
    }

    async fn exists_by_parking_spot_number(&self, parking_spot_number: &str) -> Result<bool, RepositoryError> {
        let spots = self.spots.read().await;
        Ok(spots.values().any(|s| s.parking_spot_number == parking_spot_number))
    }

    async fn exists_by_apartment_and_block(
        &self,
        apartment: &str,
        block: &str,
    ) -> Result<bool, RepositoryError> {
        let spots = self.spots.read().await;
        Ok(spots.values().any(|s| s.apartment == apartment && s.block == block))
    }

    async fn update(&self, spot: &ParkingSpot) -> Result<ParkingSpot, RepositoryError> {
        let mut spots = self.spots.write().await;
        if !spots.contains_key(&spot.id) {
            return Err(RepositoryError::Missing(spot.id));
        }
        if let Some(constraint) = violated_constraint(&spots, spot) {
            return Err(RepositoryError::unique_violation(constraint));
        }
        spots.insert(spot.id, spot.clone());
        Ok(spot.clone())
    }

    async fn delete(&self, spot: &ParkingSpot) -> Result<(), RepositoryError> {
        self.spots
            .write()
            .await
            .remove(&spot.id)
            .map(|_| ())
            .ok_or(RepositoryError::Missing(spot.id))
    }
}
