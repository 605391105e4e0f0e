use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::models::ParkingSpot;

/// Raw query string of `GET /parking-spot`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub sort: Option<String>,
    pub direction: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    Id,
    ParkingSpotNumber,
    LicensePlateCar,
    BrandCar,
    ModelCar,
    ColorCar,
    RegistrationDate,
    ResponsibleName,
    Apartment,
    Block,
}

impl SortField {
    pub fn from_property(property: &str) -> Option<Self> {
        let field = match property {
            "id" => SortField::Id,
            "parkingSpotNumber" => SortField::ParkingSpotNumber,
            "licensePlateCar" => SortField::LicensePlateCar,
            "brandCar" => SortField::BrandCar,
            "modelCar" => SortField::ModelCar,
            "colorCar" => SortField::ColorCar,
            "registrationDate" => SortField::RegistrationDate,
            "responsibleName" => SortField::ResponsibleName,
            "apartment" => SortField::Apartment,
            "block" => SortField::Block,
            _ => return None,
        };
        Some(field)
    }

    /// Column name in the `parking_spot` table.
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::ParkingSpotNumber => "parking_spot_number",
            SortField::LicensePlateCar => "license_plate_car",
            SortField::BrandCar => "brand_car",
            SortField::ModelCar => "model_car",
            SortField::ColorCar => "color_car",
            SortField::RegistrationDate => "registration_date",
            SortField::ResponsibleName => "responsible_name",
            SortField::Apartment => "apartment",
            SortField::Block => "block",
        }
    }

    pub fn compare(&self, a: &ParkingSpot, b: &ParkingSpot) -> Ordering {
        match self {
            SortField::Id => a.id.cmp(&b.id),
            SortField::ParkingSpotNumber => a.parking_spot_number.cmp(&b.parking_spot_number),
            SortField::LicensePlateCar => a.license_plate_car.cmp(&b.license_plate_car),
            SortField::BrandCar => a.brand_car.cmp(&b.brand_car),
            SortField::ModelCar => a.model_car.cmp(&b.model_car),
            SortField::ColorCar => a.color_car.cmp(&b.color_car),
            SortField::RegistrationDate => a.registration_date.cmp(&b.registration_date),
            SortField::ResponsibleName => a.responsible_name.cmp(&b.responsible_name),
            SortField::Apartment => a.apartment.cmp(&b.apartment),
            SortField::Block => a.block.cmp(&b.block),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(Direction::Asc),
            "desc" => Some(Direction::Desc),
            _ => None,
        }
    }

    pub fn sql(&self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }

    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Sort {
    pub property: SortField,
    pub direction: Direction,
}

/// A resolved, bounded page request handed to the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort: Sort,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: Sort {
                property: SortField::Id,
                direction: Direction::Asc,
            },
        }
    }
}

impl PageRequest {
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }

    /// Ordering used by in-process stores: the requested sort, then id ascending.
    pub fn compare(&self, a: &ParkingSpot, b: &ParkingSpot) -> Ordering {
        self.sort
            .direction
            .apply(self.sort.property.compare(a, b))
            .then_with(|| a.id.cmp(&b.id))
    }
}

impl TryFrom<PageParams> for PageRequest {
    type Error = String;

    fn try_from(params: PageParams) -> Result<Self, Self::Error> {
        let page = params
            .page
            .map(|p| p.clamp(0, i64::from(u32::MAX)) as u32)
            .unwrap_or(0);
        let size = match params.size {
            Some(s) if s >= 1 => s.min(i64::from(MAX_PAGE_SIZE)) as u32,
            _ => DEFAULT_PAGE_SIZE,
        };

        let mut direction = match params.direction.as_deref() {
            Some(d) => Direction::parse(d).ok_or_else(|| format!("Invalid sort direction: {}", d))?,
            None => Direction::Asc,
        };

        let property = match params.sort.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(sort) => {
                let mut parts = sort.splitn(2, ',');
                let name = parts.next().unwrap_or_default().trim();
                if let Some(d) = parts.next() {
                    direction = Direction::parse(d)
                        .ok_or_else(|| format!("Invalid sort direction: {}", d.trim()))?;
                }
                SortField::from_property(name)
                    .ok_or_else(|| format!("Invalid sort property: {}", name))?
            }
            None => SortField::Id,
        };

        Ok(Self {
            page,
            size,
            sort: Sort {
                property,
                direction,
            },
        })
    }
}

/// Page envelope returned by the list endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u64,
    pub number: u32,
    pub size: u32,
    pub number_of_elements: usize,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
    pub sort: Sort,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        let size = u64::from(request.size);
        let total_pages = total_elements.div_ceil(size);
        let number_of_elements = content.len();
        Self {
            empty: content.is_empty(),
            content,
            total_elements,
            total_pages,
            number: request.page,
            size: request.size,
            number_of_elements,
            first: request.page == 0,
            last: u64::from(request.page) + 1 >= total_pages,
            sort: request.sort,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: Option<i64>, size: Option<i64>, sort: Option<&str>, direction: Option<&str>) -> PageParams {
        PageParams {
            page,
            size,
            sort: sort.map(String::from),
            direction: direction.map(String::from),
        }
    }

    #[test]
    fn empty_params_resolve_to_first_ten_by_id_ascending() {
        let request = PageRequest::try_from(PageParams::default()).unwrap();
        assert_eq!(request, PageRequest::default());
        assert_eq!(request.size, 10);
        assert_eq!(request.offset(), 0);
    }

    #[test]
    fn out_of_range_page_and_size_are_normalised() {
        let request = PageRequest::try_from(params(Some(-3), Some(0), None, None)).unwrap();
        assert_eq!(request.page, 0);
        assert_eq!(request.size, DEFAULT_PAGE_SIZE);

        let request = PageRequest::try_from(params(Some(2), Some(1_000_000), None, None)).unwrap();
        assert_eq!(request.size, MAX_PAGE_SIZE);
        assert_eq!(request.offset(), 2 * u64::from(MAX_PAGE_SIZE));
    }

    #[test]
    fn direction_embedded_in_sort_wins() {
        let request =
            PageRequest::try_from(params(None, None, Some("licensePlateCar,desc"), Some("asc"))).unwrap();
        assert_eq!(request.sort.property, SortField::LicensePlateCar);
        assert_eq!(request.sort.direction, Direction::Desc);
    }

    #[test]
    fn direction_param_is_case_insensitive() {
        let request = PageRequest::try_from(params(None, None, Some("block"), Some("DESC"))).unwrap();
        assert_eq!(request.sort.property, SortField::Block);
        assert_eq!(request.sort.direction, Direction::Desc);
    }

    #[test]
    fn unknown_sort_property_is_rejected() {
        let err = PageRequest::try_from(params(None, None, Some("password"), None)).unwrap_err();
        assert_eq!(err, "Invalid sort property: password");
    }

    #[test]
    fn unknown_direction_is_rejected() {
        let err = PageRequest::try_from(params(None, None, None, Some("sideways"))).unwrap_err();
        assert_eq!(err, "Invalid sort direction: sideways");
    }

    #[test]
    fn page_envelope_counts_pages() {
        let request = PageRequest {
            page: 1,
            size: 10,
            ..PageRequest::default()
        };
        let page = Page::new(vec![1, 2, 3], &request, 13);

        assert_eq!(page.total_pages, 2);
        assert_eq!(page.number_of_elements, 3);
        assert!(!page.first);
        assert!(page.last);
        assert!(!page.empty);
    }

    #[test]
    fn empty_store_yields_an_empty_last_page() {
        let page: Page<u8> = Page::new(vec![], &PageRequest::default(), 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.first);
        assert!(page.last);
        assert!(page.empty);
    }
}
