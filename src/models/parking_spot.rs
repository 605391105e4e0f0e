use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::constants::DATETIME_FORMAT;
use crate::error::FieldError;

/// Formats a timestamp the way every `registrationDate` leaves the API.
pub fn format_utc(dt: &DateTime<Utc>) -> String {
    dt.format(DATETIME_FORMAT).to_string()
}

fn serialize_registration_date<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_utc(dt))
}

fn deserialize_registration_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let s = String::deserialize(deserializer)?;
    if let Ok(naive) = NaiveDateTime::parse_from_str(&s, DATETIME_FORMAT) {
        return Ok(naive.and_utc());
    }
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| D::Error::custom(format!("Invalid date format: {}", s)))
}

// Missing and null both collapse to "", so presence is reported by validation.
fn deserialize_trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.map(|s| s.trim().to_string()).unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ParkingSpot {
    pub id: Uuid,
    pub parking_spot_number: String,
    pub license_plate_car: String,
    pub brand_car: String,
    pub model_car: String,
    pub color_car: String,
    #[serde(
        serialize_with = "serialize_registration_date",
        deserialize_with = "deserialize_registration_date"
    )]
    pub registration_date: DateTime<Utc>,
    pub responsible_name: String,
    pub apartment: String,
    pub block: String,
}

impl ParkingSpot {
    /// Builds a brand new record: fresh id, registered now.
    pub fn register(dto: ParkingSpotDto) -> Self {
        Self::from_dto(Uuid::new_v4(), Utc::now(), dto)
    }

    /// Overwrites every mutable field, keeping id and registration date.
    pub fn with_changes(&self, dto: ParkingSpotDto) -> Self {
        Self::from_dto(self.id, self.registration_date, dto)
    }

    fn from_dto(id: Uuid, registration_date: DateTime<Utc>, dto: ParkingSpotDto) -> Self {
        Self {
            id,
            parking_spot_number: dto.parking_spot_number,
            license_plate_car: dto.license_plate_car,
            brand_car: dto.brand_car,
            model_car: dto.model_car,
            color_car: dto.color_car,
            registration_date,
            responsible_name: dto.responsible_name,
            apartment: dto.apartment,
            block: dto.block,
        }
    }
}

/// Request body for create and update. Unknown keys such as `id` or
/// `registrationDate` are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ParkingSpotDto {
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 1, max = 10))]
    pub parking_spot_number: String,
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 1, max = 7))]
    pub license_plate_car: String,
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 1, max = 70))]
    pub brand_car: String,
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 1, max = 70))]
    pub model_car: String,
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 1, max = 70))]
    pub color_car: String,
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 1, max = 130))]
    pub responsible_name: String,
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 1, max = 30))]
    pub apartment: String,
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 1, max = 30))]
    pub block: String,
}

impl ParkingSpotDto {
    /// Runs the field rules and flattens any failures into per-field messages,
    /// sorted by field name.
    pub fn check(&self) -> Result<(), Vec<FieldError>> {
        self.validate().map_err(|errors| field_errors(&errors))
    }
}

fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = camel_case(&field.to_string());
            errs.iter().map(move |err| {
                let blank = err
                    .params
                    .get("value")
                    .and_then(|v| v.as_str())
                    .map(str::is_empty)
                    .unwrap_or(false);
                let message = if blank {
                    "must not be blank".to_string()
                } else if let Some(max) = err.params.get("max") {
                    format!("size must be at most {}", max)
                } else {
                    err.code.to_string()
                };
                FieldError::new(field.clone(), message)
            })
        })
        .collect();
    fields.sort_by(|a, b| a.field.cmp(&b.field));
    fields
}

fn camel_case(snake: &str) -> String {
    let mut out = String::with_capacity(snake.len());
    let mut upper = false;
    for c in snake.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
