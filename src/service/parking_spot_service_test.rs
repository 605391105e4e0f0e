use std::sync::Arc;

use async_trait::async_trait;
use tracing_test::traced_test;
use uuid::Uuid;

use super::parking_spot_service::conflict_message;
use super::ParkingSpotService;
use crate::constants::{
    APARTMENT_BLOCK_IN_USE, LICENSE_PLATE_IN_USE, PARKING_SPOT_IN_USE, PARKING_SPOT_NOT_FOUND,
    UK_APARTMENT_BLOCK, UK_LICENSE_PLATE_CAR, UK_PARKING_SPOT_NUMBER,
};
use crate::error::AppError;
use crate::models::{Page, PageRequest, ParkingSpot, ParkingSpotDto};
use crate::repository::{InMemoryParkingSpotRepository, ParkingSpotRepository, RepositoryError};

fn dto(number: &str, plate: &str, apartment: &str, block: &str) -> ParkingSpotDto {
    ParkingSpotDto {
        parking_spot_number: number.to_string(),
        license_plate_car: plate.to_string(),
        brand_car: "Volkswagen".to_string(),
        model_car: "Gol".to_string(),
        color_car: "Blue".to_string(),
        responsible_name: "Carlos Souza".to_string(),
        apartment: apartment.to_string(),
        block: block.to_string(),
    }
}

fn service() -> (ParkingSpotService, InMemoryParkingSpotRepository) {
    let repo = InMemoryParkingSpotRepository::new();
    (ParkingSpotService::new(Arc::new(repo.clone())), repo)
}

/// Answers "no" to every existence check, as if a concurrent writer committed
/// between the checks and the insert.
struct RacingRepository {
    inner: InMemoryParkingSpotRepository,
}

#[async_trait]
impl ParkingSpotRepository for RacingRepository {
    async fn create(&self, spot: &ParkingSpot) -> Result<ParkingSpot, RepositoryError> {
        self.inner.create(spot).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ParkingSpot>, RepositoryError> {
        self.inner.find_by_id(id).await
    }

    async fn find_page(&self, request: &PageRequest) -> Result<Page<ParkingSpot>, RepositoryError> {
        self.inner.find_page(request).await
    }

    async fn exists_by_license_plate_car(&self, _: &str) -> Result<bool, RepositoryError> {
        Ok(false)
    }

    async fn exists_by_parking_spot_number(&self, _: &str) -> Result<bool, RepositoryError> {
        Ok(false)
    }

    async fn exists_by_apartment_and_block(&self, _: &str, _: &str) -> Result<bool, RepositoryError> {
        Ok(false)
    }

    async fn update(&self, spot: &ParkingSpot) -> Result<ParkingSpot, RepositoryError> {
        self.inner.update(spot).await
    }

    async fn delete(&self, spot: &ParkingSpot) -> Result<(), RepositoryError> {
        self.inner.delete(spot).await
    }
}

#[test]
fn conflict_message_maps_each_constraint() {
    assert_eq!(conflict_message(UK_LICENSE_PLATE_CAR), LICENSE_PLATE_IN_USE);
    assert_eq!(conflict_message(UK_PARKING_SPOT_NUMBER), PARKING_SPOT_IN_USE);
    assert_eq!(conflict_message(UK_APARTMENT_BLOCK), APARTMENT_BLOCK_IN_USE);
    assert_eq!(conflict_message("parking_spot_pkey"), "Conflict: Parking Spot already exists!");
}

#[tokio::test]
async fn existence_predicates_reflect_saved_record() {
    let (service, _) = service();
    service.save(ParkingSpot::register(dto("A-101", "ABC1234", "101", "A"))).await.unwrap();

    assert!(service.exists_by_license_plate_car("ABC1234").await.unwrap());
    assert!(!service.exists_by_license_plate_car("XYZ0000").await.unwrap());
    assert!(service.exists_by_parking_spot_number("A-101").await.unwrap());
    assert!(service.exists_by_apartment_and_block("101", "A").await.unwrap());
    assert!(!service.exists_by_apartment_and_block("101", "B").await.unwrap());
}

#[tokio::test]
async fn save_turns_store_level_violation_into_conflict() {
    let inner = InMemoryParkingSpotRepository::new();
    let service = ParkingSpotService::new(Arc::new(RacingRepository { inner: inner.clone() }));

    service.save(ParkingSpot::register(dto("A-101", "ABC1234", "101", "A"))).await.unwrap();
    assert!(!service.exists_by_license_plate_car("ABC1234").await.unwrap());

    let err = service
        .save(ParkingSpot::register(dto("A-102", "ABC1234", "102", "A")))
        .await
        .unwrap_err();

    match err {
        AppError::Conflict(msg) => assert_eq!(msg, LICENSE_PLATE_IN_USE),
        other => panic!("expected conflict, got {:?}", other),
    }
    assert_eq!(inner.len().await, 1);
}

#[tokio::test]
async fn update_of_vanished_record_is_not_found() {
    let (service, _) = service();
    let ghost = ParkingSpot::register(dto("A-101", "ABC1234", "101", "A"));

    match service.update(ghost).await.unwrap_err() {
        AppError::NotFound(msg) => assert_eq!(msg, PARKING_SPOT_NOT_FOUND),
        other => panic!("expected not found, got {:?}", other),
    }
}

#[tokio::test]
async fn update_into_another_records_spot_number_is_conflict() {
    let (service, _) = service();
    service.save(ParkingSpot::register(dto("A-101", "ABC1234", "101", "A"))).await.unwrap();
    let second = service
        .save(ParkingSpot::register(dto("A-102", "DEF5678", "102", "A")))
        .await
        .unwrap();

    let err = service
        .update(second.with_changes(dto("A-101", "DEF5678", "102", "A")))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(ref msg) if msg == PARKING_SPOT_IN_USE));
}

#[tokio::test]
async fn delete_removes_record() {
    let (service, repo) = service();
    let saved = service
        .save(ParkingSpot::register(dto("A-101", "ABC1234", "101", "A")))
        .await
        .unwrap();

    service.delete(&saved).await.unwrap();

    assert!(service.find_by_id(saved.id).await.unwrap().is_none());
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn find_all_defaults_to_ten_by_id() {
    let (service, _) = service();
    for i in 0..11 {
        service
            .save(ParkingSpot::register(dto(&format!("S-{i}"), &format!("P{i:06}"), &i.to_string(), "A")))
            .await
            .unwrap();
    }

    let page = service.find_all(&PageRequest::default()).await.unwrap();

    assert_eq!(page.content.len(), 10);
    assert_eq!(page.total_elements, 11);
    assert!(page.content.windows(2).all(|w| w[0].id < w[1].id));
}

#[tokio::test]
#[traced_test]
async fn save_logs_start_and_success() {
    let (service, _) = service();
    let saved = service
        .save(ParkingSpot::register(dto("A-101", "ABC1234", "101", "A")))
        .await
        .unwrap();

    assert!(logs_contain("Saving parking spot A-101 for license plate ABC1234"));
    assert!(logs_contain(&format!("Successfully saved parking spot: {}", saved.id)));
}

#[tokio::test]
#[traced_test]
async fn rejected_write_logs_constraint_name() {
    let inner = InMemoryParkingSpotRepository::new();
    let service = ParkingSpotService::new(Arc::new(RacingRepository { inner }));
    service.save(ParkingSpot::register(dto("A-101", "ABC1234", "101", "A"))).await.unwrap();

    let _ = service.save(ParkingSpot::register(dto("A-101", "XYZ9999", "9", "Z"))).await;

    assert!(logs_contain("Store rejected write on constraint uk_parking_spot_number"));
}

#[tokio::test]
#[traced_test]
async fn delete_logs_record_id() {
    let (service, _) = service();
    let saved = service
        .save(ParkingSpot::register(dto("A-101", "ABC1234", "101", "A")))
        .await
        .unwrap();

    service.delete(&saved).await.unwrap();

    assert!(logs_contain(&format!("Deleting parking spot: {}", saved.id)));
    assert!(logs_contain(&format!("Successfully deleted parking spot: {}", saved.id)));
}
