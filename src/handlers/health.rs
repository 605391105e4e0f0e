use axum::{response::Json, routing::get, Router};
use serde_json::json;
use crate::service::ParkingSpotService;

pub fn router() -> Router<ParkingSpotService> {
    Router::new().route("/health", get(health_check))
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "message": "Parking Control API is healthy"
    }))
}
