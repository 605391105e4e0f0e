pub mod page;
pub mod parking_spot;

pub use page::{Direction, Page, PageParams, PageRequest, Sort, SortField};
pub use parking_spot::{format_utc, ParkingSpot, ParkingSpotDto};
