use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde_json::json;
use uuid::Uuid;

use crate::constants::{
    API_NAME, APARTMENT_BLOCK_IN_USE, LICENSE_PLATE_IN_USE, PARKING_SPOT_DELETED, PARKING_SPOT_IN_USE,
    PARKING_SPOT_NOT_FOUND,
};
use crate::error::AppError;
use crate::models::{Page, PageParams, PageRequest, ParkingSpot, ParkingSpotDto};
use crate::service::ParkingSpotService;

pub fn router() -> Router<ParkingSpotService> {
    Router::new()
        .route("/", get(get_all_parking_spots).post(save_parking_spot))
        .route(
            "/:id",
            get(get_one_parking_spot)
                .put(update_parking_spot)
                .delete(delete_parking_spot),
        )
}

fn validated(payload: Result<Json<ParkingSpotDto>, JsonRejection>) -> Result<ParkingSpotDto, AppError> {
    let Json(dto) = payload?;
    dto.check().map_err(AppError::Validation)?;
    Ok(dto)
}

async fn existing(
    service: &ParkingSpotService,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<ParkingSpot, AppError> {
    let Path(id) = id?;
    service
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(PARKING_SPOT_NOT_FOUND.to_string()))
}

async fn save_parking_spot(
    State(service): State<ParkingSpotService>,
    payload: Result<Json<ParkingSpotDto>, JsonRejection>,
) -> Result<(StatusCode, Json<ParkingSpot>), AppError> {
    let dto = validated(payload)?;

    if service.exists_by_license_plate_car(&dto.license_plate_car).await? {
        return Err(AppError::Conflict(LICENSE_PLATE_IN_USE.to_string()));
    }
    if service.exists_by_parking_spot_number(&dto.parking_spot_number).await? {
        return Err(AppError::Conflict(PARKING_SPOT_IN_USE.to_string()));
    }
    if service.exists_by_apartment_and_block(&dto.apartment, &dto.block).await? {
        return Err(AppError::Conflict(APARTMENT_BLOCK_IN_USE.to_string()));
    }

    let saved = service.save(ParkingSpot::register(dto)).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

async fn get_all_parking_spots(
    State(service): State<ParkingSpotService>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<Page<ParkingSpot>>, AppError> {
    let Query(params) = params?;
    let request = PageRequest::try_from(params).map_err(AppError::BadRequest)?;

    tracing::debug!(
        "{} Listing parking spots page {} size {} sort {:?}",
        API_NAME,
        request.page,
        request.size,
        request.sort
    );

    Ok(Json(service.find_all(&request).await?))
}

async fn get_one_parking_spot(
    State(service): State<ParkingSpotService>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ParkingSpot>, AppError> {
    Ok(Json(existing(&service, id).await?))
}

async fn delete_parking_spot(
    State(service): State<ParkingSpotService>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let spot = existing(&service, id).await?;
    service.delete(&spot).await?;

    Ok(Json(json!({ "message": PARKING_SPOT_DELETED })))
}

async fn update_parking_spot(
    State(service): State<ParkingSpotService>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<ParkingSpotDto>, JsonRejection>,
) -> Result<Json<ParkingSpot>, AppError> {
    let current = existing(&service, id).await?;
    let dto = validated(payload)?;

    Ok(Json(service.update(current.with_changes(dto)).await?))
}
