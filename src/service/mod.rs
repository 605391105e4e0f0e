pub mod parking_spot_service;

#[cfg(test)]
mod parking_spot_service_test;

pub use parking_spot_service::ParkingSpotService;
