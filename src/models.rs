// Core data structures shared across the storefront:
// Vehicle, Banner, Filters, SortOption and friends.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// Vehicle classification. Every catalogue record carries one of these.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleType {
    #[default]
    #[serde(rename = "4-wheeler")]
    FourWheeler,
    #[serde(rename = "2-wheeler")]
    TwoWheeler,
}

impl VehicleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::FourWheeler => "4-wheeler",
            VehicleType::TwoWheeler => "2-wheeler",
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "4-wheeler" => Some(VehicleType::FourWheeler),
            "2-wheeler" => Some(VehicleType::TwoWheeler),
            _ => None,
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Named photo angles/components the API may carry for a vehicle.
// Modelled as a closed set so gallery consumers can iterate the image map
// instead of poking at dozens of ad-hoc optional fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ImageSlot {
    #[serde(rename = "imageUrl")]
    Primary,
    #[serde(rename = "img_front")]
    Front,
    #[serde(rename = "img_front_right")]
    FrontRight,
    #[serde(rename = "img_right")]
    Right,
    #[serde(rename = "img_back_right")]
    BackRight,
    #[serde(rename = "img_back")]
    Back,
    #[serde(rename = "img_open_dickey")]
    OpenDickey,
    #[serde(rename = "img_back_left")]
    BackLeft,
    #[serde(rename = "img_left")]
    Left,
    #[serde(rename = "img_front_left")]
    FrontLeft,
    #[serde(rename = "img_open_bonnet")]
    OpenBonnet,
    #[serde(rename = "img_dashboard")]
    Dashboard,
    #[serde(rename = "img_right_front_door")]
    RightFrontDoor,
    #[serde(rename = "img_right_back_door")]
    RightBackDoor,
    #[serde(rename = "img_tyre_1")]
    Tyre1,
    #[serde(rename = "img_tyre_2")]
    Tyre2,
    #[serde(rename = "img_tyre_3")]
    Tyre3,
    #[serde(rename = "img_tyre_4")]
    Tyre4,
    #[serde(rename = "img_tyre_optional")]
    TyreOptional,
    #[serde(rename = "img_engine")]
    Engine,
    #[serde(rename = "img_roof")]
    Roof,
}

impl ImageSlot {
    pub const ALL: [ImageSlot; 21] = [
        ImageSlot::Primary,
        ImageSlot::Front,
        ImageSlot::FrontRight,
        ImageSlot::Right,
        ImageSlot::BackRight,
        ImageSlot::Back,
        ImageSlot::OpenDickey,
        ImageSlot::BackLeft,
        ImageSlot::Left,
        ImageSlot::FrontLeft,
        ImageSlot::OpenBonnet,
        ImageSlot::Dashboard,
        ImageSlot::RightFrontDoor,
        ImageSlot::RightBackDoor,
        ImageSlot::Tyre1,
        ImageSlot::Tyre2,
        ImageSlot::Tyre3,
        ImageSlot::Tyre4,
        ImageSlot::TyreOptional,
        ImageSlot::Engine,
        ImageSlot::Roof,
    ];

    // Field name the remote API uses for this slot.
    pub fn api_key(&self) -> &'static str {
        match self {
            ImageSlot::Primary => "imageUrl",
            ImageSlot::Front => "img_front",
            ImageSlot::FrontRight => "img_front_right",
            ImageSlot::Right => "img_right",
            ImageSlot::BackRight => "img_back_right",
            ImageSlot::Back => "img_back",
            ImageSlot::OpenDickey => "img_open_dickey",
            ImageSlot::BackLeft => "img_back_left",
            ImageSlot::Left => "img_left",
            ImageSlot::FrontLeft => "img_front_left",
            ImageSlot::OpenBonnet => "img_open_bonnet",
            ImageSlot::Dashboard => "img_dashboard",
            ImageSlot::RightFrontDoor => "img_right_front_door",
            ImageSlot::RightBackDoor => "img_right_back_door",
            ImageSlot::Tyre1 => "img_tyre_1",
            ImageSlot::Tyre2 => "img_tyre_2",
            ImageSlot::Tyre3 => "img_tyre_3",
            ImageSlot::Tyre4 => "img_tyre_4",
            ImageSlot::TyreOptional => "img_tyre_optional",
            ImageSlot::Engine => "img_engine",
            ImageSlot::Roof => "img_roof",
        }
    }
}

// A normalized catalogue listing. Owned by the external API; we only
// read and cache these for the duration of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    pub make: String,
    pub model: String,
    pub price: u64,
    pub variant: Option<String>,
    pub year: Option<u32>,
    pub status: Option<String>,
    pub verified: Option<bool>,
    pub mfg_year: Option<u32>,
    pub reg_year: Option<u32>,
    pub reg_number: Option<String>,
    pub rto_state: Option<String>,
    pub ownership: Option<String>,
    pub kms_driven: u64,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub insurance: Option<String>,
    pub service_history: Option<String>,
    pub color: Option<String>,
    pub vehicle_type: VehicleType,
    // Absolute URLs, one entry per photographed angle actually present.
    #[serde(default)]
    pub images: BTreeMap<ImageSlot, String>,
}

impl Vehicle {
    pub fn primary_image(&self) -> Option<&str> {
        self.images.get(&ImageSlot::Primary).map(String::as_str)
    }

    // "2018 Maruti Suzuki Swift" style label for cards and logs.
    pub fn title(&self) -> String {
        match self.year {
            Some(year) => format!("{} {} {}", year, self.make, self.model),
            None => format!("{} {}", self.make, self.model),
        }
    }
}

// Promotional banner from the remote API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    pub title: String,
    pub image_url: String,
}

// The multi-valued filter dimensions. Vehicle type is deliberately not one
// of these; it is a scalar with reset-everything semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MultiFilterField {
    #[serde(rename = "fuelType")]
    FuelType,
    #[serde(rename = "year")]
    Year,
    #[serde(rename = "rto")]
    Rto,
    #[serde(rename = "ownership")]
    Ownership,
    #[serde(rename = "transmission")]
    Transmission,
}

impl MultiFilterField {
    pub const ALL: [MultiFilterField; 5] = [
        MultiFilterField::FuelType,
        MultiFilterField::Year,
        MultiFilterField::Rto,
        MultiFilterField::Ownership,
        MultiFilterField::Transmission,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MultiFilterField::FuelType => "fuelType",
            MultiFilterField::Year => "year",
            MultiFilterField::Rto => "rto",
            MultiFilterField::Ownership => "ownership",
            MultiFilterField::Transmission => "transmission",
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "fuelType" => Some(MultiFilterField::FuelType),
            "year" => Some(MultiFilterField::Year),
            "rto" => Some(MultiFilterField::Rto),
            "ownership" => Some(MultiFilterField::Ownership),
            "transmission" => Some(MultiFilterField::Transmission),
            _ => None,
        }
    }
}

// The composite user-controlled constraint set for the listing grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filters {
    pub vehicle_type: VehicleType,
    #[serde(default)]
    pub fuel_type: Vec<String>,
    #[serde(default)]
    pub year: Vec<String>,
    #[serde(default)]
    pub rto: Vec<String>,
    #[serde(default)]
    pub ownership: Vec<String>,
    #[serde(default)]
    pub transmission: Vec<String>,
}

impl Default for Filters {
    fn default() -> Self {
        Filters {
            vehicle_type: VehicleType::FourWheeler,
            fuel_type: Vec::new(),
            year: Vec::new(),
            rto: Vec::new(),
            ownership: Vec::new(),
            transmission: Vec::new(),
        }
    }
}

impl Filters {
    pub fn field(&self, field: MultiFilterField) -> &Vec<String> {
        match field {
            MultiFilterField::FuelType => &self.fuel_type,
            MultiFilterField::Year => &self.year,
            MultiFilterField::Rto => &self.rto,
            MultiFilterField::Ownership => &self.ownership,
            MultiFilterField::Transmission => &self.transmission,
        }
    }

    pub fn field_mut(&mut self, field: MultiFilterField) -> &mut Vec<String> {
        match field {
            MultiFilterField::FuelType => &mut self.fuel_type,
            MultiFilterField::Year => &mut self.year,
            MultiFilterField::Rto => &mut self.rto,
            MultiFilterField::Ownership => &mut self.ownership,
            MultiFilterField::Transmission => &mut self.transmission,
        }
    }

    // Empty every multi-valued dimension, keeping the vehicle type.
    pub fn reset_multi_fields(&mut self) {
        for field in MultiFilterField::ALL {
            self.field_mut(field).clear();
        }
    }
}

// The single active ordering for the result list. Default is price-asc.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOption {
    #[default]
    #[serde(rename = "price-asc")]
    PriceAsc,
    #[serde(rename = "price-desc")]
    PriceDesc,
    #[serde(rename = "year-asc")]
    YearAsc,
    #[serde(rename = "year-desc")]
    YearDesc,
    #[serde(rename = "kms-asc")]
    KmsAsc,
    #[serde(rename = "kms-desc")]
    KmsDesc,
}

impl SortOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::PriceAsc => "price-asc",
            SortOption::PriceDesc => "price-desc",
            SortOption::YearAsc => "year-asc",
            SortOption::YearDesc => "year-desc",
            SortOption::KmsAsc => "kms-asc",
            SortOption::KmsDesc => "kms-desc",
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "price-asc" => Some(SortOption::PriceAsc),
            "price-desc" => Some(SortOption::PriceDesc),
            "year-asc" => Some(SortOption::YearAsc),
            "year-desc" => Some(SortOption::YearDesc),
            "kms-asc" => Some(SortOption::KmsAsc),
            "kms-desc" => Some(SortOption::KmsDesc),
            _ => None,
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
