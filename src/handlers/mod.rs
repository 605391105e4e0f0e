pub mod health;
pub mod parking_spot;

use axum::http::Method;
use axum::Router;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

use crate::service::ParkingSpotService;

/// Full application: routes, CORS open to any origin, shared service state.
pub fn build_router(service: ParkingSpotService) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .nest("/parking-spot", parking_spot::router())
        .merge(health::router())
        .layer(cors)
        .with_state(service)
}
