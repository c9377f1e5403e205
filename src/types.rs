use crate::constants;
use serde::{Deserialize, Serialize};

/// Lot-number (jibun) form of an address. Always present on a structured
/// search document; the region hierarchy narrows from province to district.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LotAddress {
    pub address_name: String,
    #[serde(default)]
    pub region_1depth_name: String,
    #[serde(default)]
    pub region_2depth_name: String,
    #[serde(default)]
    pub region_3depth_name: String,
    #[serde(default)]
    pub mountain_yn: String,
    #[serde(default)]
    pub main_address_no: String,
    #[serde(default)]
    pub sub_address_no: String,
    #[serde(default)]
    pub x: String,
    #[serde(default)]
    pub y: String,
}

/// Road-name form of an address. The provider omits it for parcels that have
/// no road designation, hence `Option` at every use site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadAddress {
    pub address_name: String,
    #[serde(default)]
    pub region_1depth_name: String,
    #[serde(default)]
    pub region_2depth_name: String,
    #[serde(default)]
    pub region_3depth_name: String,
    #[serde(default)]
    pub road_name: String,
    #[serde(default)]
    pub underground_yn: String,
    #[serde(default)]
    pub main_building_no: String,
    #[serde(default)]
    pub sub_building_no: String,
    #[serde(default)]
    pub building_name: String,
    #[serde(default)]
    pub zone_no: String,
    #[serde(default)]
    pub x: String,
    #[serde(default)]
    pub y: String,
}

/// One document from the structured-address search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressDocument {
    pub address_name: String,
    #[serde(default)]
    pub address_type: String,
    #[serde(default)]
    pub x: String,
    #[serde(default)]
    pub y: String,
    pub address: LotAddress,
    #[serde(default)]
    pub road_address: Option<RoadAddress>,
}

/// One document from the keyword (place) search endpoint. Addresses arrive as
/// flat strings here; the provider sends `""` rather than null when a place
/// has no road-form address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceDocument {
    #[serde(default)]
    pub id: String,
    pub place_name: String,
    #[serde(default)]
    pub category_name: String,
    #[serde(default)]
    pub category_group_code: String,
    #[serde(default)]
    pub category_group_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address_name: String,
    #[serde(default)]
    pub road_address_name: String,
    #[serde(default)]
    pub x: String,
    #[serde(default)]
    pub y: String,
    #[serde(default)]
    pub place_url: String,
    #[serde(default)]
    pub distance: String,
}

/// One document from the coordinate-to-address endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoordDocument {
    #[serde(default)]
    pub road_address: Option<RoadAddress>,
    #[serde(default)]
    pub address: Option<LotAddress>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub total_count: u32,
    #[serde(default)]
    pub pageable_count: u32,
    #[serde(default)]
    pub is_end: bool,
}

/// Response envelope shared by all three provider endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentsResponse<D> {
    pub documents: Vec<D>,
    #[serde(default)]
    pub meta: Meta,
}

/// Which gateway operation a query routes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Exact address input ("서울특별시 강남구 테헤란로 152")
    Structured,
    /// Place or business name ("강남역")
    Keyword,
}

/// A single selectable search result. Tagged so the selection step has to
/// handle both shapes explicitly instead of probing optional fields.
#[derive(Debug, Clone)]
pub enum AddressCandidate {
    Structured(AddressDocument),
    Place(PlaceDocument),
}

/// Typed failure from the platform's geolocation capability. Acquiring the
/// coordinates is the caller's job; these are the outcomes it can hand us.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeolocationFailure {
    PermissionDenied,
    PositionUnavailable,
    Timeout,
}

impl GeolocationFailure {
    pub fn message(&self) -> &'static str {
        match self {
            GeolocationFailure::PermissionDenied => constants::MSG_LOCATION_PERMISSION_DENIED,
            GeolocationFailure::PositionUnavailable => constants::MSG_LOCATION_UNAVAILABLE,
            GeolocationFailure::Timeout => constants::MSG_LOCATION_TIMEOUT,
        }
    }
}
