pub const API_NAME: &str = "[parking-control]";

/// Wire format for `registrationDate`: `yyyy-MM-ddTHH:mm:ssZ`, always UTC.
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 2000;

pub const PARKING_SPOT_NOT_FOUND: &str = "Parking Spot not found.";
pub const PARKING_SPOT_DELETED: &str = "Parking Spot deleted successfully.";

pub const LICENSE_PLATE_IN_USE: &str = "Conflict: License Plate Car is already in use!";
pub const PARKING_SPOT_IN_USE: &str = "Conflict: Parking Spot is already in use!";
pub const APARTMENT_BLOCK_IN_USE: &str =
    "Conflict: Parking Spot already registered for this apartment/block!";

// Unique constraint names declared in migrations/.
pub const UK_PARKING_SPOT_NUMBER: &str = "uk_parking_spot_number";
pub const UK_LICENSE_PLATE_CAR: &str = "uk_parking_spot_license_plate_car";
pub const UK_APARTMENT_BLOCK: &str = "uk_parking_spot_apartment_block";
