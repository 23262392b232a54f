// Functions to interact with the remote marketplace API (vehicles, banners).
// This is the sole adapter between the API's schema and our Vehicle type:
// field renames (odometer -> kms_driven), id coercion and absolute image
// URL construction all happen here and nowhere else.

use crate::models::{Banner, ImageSlot, Vehicle, VehicleType};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarketplaceError {
    #[error("marketplace API request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("vehicle '{0}' not found")]
    NotFound(String),
}

// Raw catalogue record exactly as the API sends it. The open-ended img_*
// fields land in `extra` and are picked up slot by slot during
// normalization; anything else the API adds is simply ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVehicle {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    make: Option<String>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    price: u64,
    variant: Option<String>,
    year: Option<u32>,
    status: Option<String>,
    verified: Option<bool>,
    mfg_year: Option<u32>,
    reg_year: Option<u32>,
    reg_number: Option<String>,
    rto_state: Option<String>,
    ownership: Option<String>,
    // The API calls this "odometer"; internally it is kms_driven.
    #[serde(default)]
    odometer: u64,
    fuel_type: Option<String>,
    transmission: Option<String>,
    insurance: Option<String>,
    service_history: Option<String>,
    color: Option<String>,
    vehicle_type: Option<VehicleType>,
    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBanner {
    #[serde(default)]
    title: String,
    #[serde(default)]
    image_url: String,
}

// The API sometimes serves relative image paths; make them absolute
// against the API base so templates and JSON consumers never care.
fn construct_image_url(base_url: &str, path: &str) -> Option<String> {
    if path.is_empty() {
        return None;
    }
    if path.starts_with("http") {
        Some(path.to_string())
    } else {
        Some(format!("{}{}", base_url, path))
    }
}

// Ids arrive as strings or numbers depending on the endpoint; missing ids
// fall back to the 1-based position so card keys stay stable for a session.
fn coerce_id(raw: &Option<Value>, index: usize) -> String {
    match raw {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => (index + 1).to_string(),
    }
}

pub fn normalize_vehicle(raw: RawVehicle, index: usize, base_url: &str) -> Vehicle {
    let mut images: BTreeMap<ImageSlot, String> = BTreeMap::new();
    for slot in ImageSlot::ALL {
        if let Some(Value::String(path)) = raw.extra.get(slot.api_key()) {
            if let Some(url) = construct_image_url(base_url, path) {
                images.insert(slot, url);
            }
        }
    }

    Vehicle {
        id: coerce_id(&raw.id, index),
        make: raw.make.unwrap_or_default(),
        model: raw.model.unwrap_or_default(),
        price: raw.price,
        variant: raw.variant,
        year: raw.year,
        status: raw.status,
        verified: raw.verified,
        mfg_year: raw.mfg_year,
        reg_year: raw.reg_year,
        reg_number: raw.reg_number,
        rto_state: raw.rto_state,
        ownership: raw.ownership,
        kms_driven: raw.odometer,
        fuel_type: raw.fuel_type,
        transmission: raw.transmission,
        insurance: raw.insurance,
        service_history: raw.service_history,
        color: raw.color,
        vehicle_type: raw.vehicle_type.unwrap_or_default(),
        images,
    }
}

// Fetches the full catalogue and normalizes every record.
pub async fn fetch_vehicles(client: &Client, base_url: &str) -> Result<Vec<Vehicle>, MarketplaceError> {
    let url = format!("{}/vehicles", base_url);
    tracing::debug!(url, "Fetching vehicle catalogue");

    let raw: Vec<RawVehicle> = client
        .get(&url)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let vehicles: Vec<Vehicle> = raw
        .into_iter()
        .enumerate()
        .map(|(index, item)| normalize_vehicle(item, index, base_url))
        .collect();

    tracing::info!(count = vehicles.len(), "Fetched vehicle catalogue");
    Ok(vehicles)
}

// Fetches one vehicle directly. 404 maps to NotFound rather than a
// transport error so callers can render a proper missing-vehicle state.
pub async fn fetch_vehicle_by_id(
    client: &Client,
    base_url: &str,
    id: &str,
) -> Result<Vehicle, MarketplaceError> {
    let url = format!("{}/vehicles/{}", base_url, id);
    tracing::debug!(url, "Fetching single vehicle");

    let response = client.get(&url).send().await?;
    if response.status() == StatusCode::NOT_FOUND {
        return Err(MarketplaceError::NotFound(id.to_string()));
    }
    let raw: RawVehicle = response.error_for_status()?.json().await?;
    Ok(normalize_vehicle(raw, 0, base_url))
}

pub async fn fetch_banners(client: &Client, base_url: &str) -> Result<Vec<Banner>, MarketplaceError> {
    let url = format!("{}/banners", base_url);
    tracing::debug!(url, "Fetching banners");

    let raw: Vec<RawBanner> = client
        .get(&url)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let banners = raw
        .into_iter()
        .map(|b| Banner {
            image_url: construct_image_url(base_url, &b.image_url).unwrap_or_default(),
            title: b.title,
        })
        .collect();
    Ok(banners)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://api.example.test";

    fn raw_from_json(json: &str) -> RawVehicle {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn odometer_maps_to_kms_driven() {
        let raw = raw_from_json(
            r#"{"id":"v1","make":"Maruti Suzuki","model":"Swift","price":500000,"odometer":42000}"#,
        );
        let vehicle = normalize_vehicle(raw, 0, BASE);
        assert_eq!(vehicle.kms_driven, 42_000);
        assert_eq!(vehicle.price, 500_000);
    }

    #[test]
    fn relative_image_paths_become_absolute() {
        let raw = raw_from_json(
            r#"{"id":"v1","make":"Honda","model":"City","price":1,
                "imageUrl":"/media/v1/main.jpg",
                "img_front":"https://cdn.example.test/front.jpg"}"#,
        );
        let vehicle = normalize_vehicle(raw, 0, BASE);
        assert_eq!(
            vehicle.images.get(&ImageSlot::Primary).map(String::as_str),
            Some("https://api.example.test/media/v1/main.jpg")
        );
        // Already-absolute URLs pass through untouched.
        assert_eq!(
            vehicle.images.get(&ImageSlot::Front).map(String::as_str),
            Some("https://cdn.example.test/front.jpg")
        );
    }

    #[test]
    fn numeric_and_missing_ids_are_coerced() {
        let numeric = raw_from_json(r#"{"id":17,"make":"Tata","model":"Nexon","price":1}"#);
        assert_eq!(normalize_vehicle(numeric, 0, BASE).id, "17");

        let missing = raw_from_json(r#"{"make":"Tata","model":"Nexon","price":1}"#);
        assert_eq!(normalize_vehicle(missing, 4, BASE).id, "5");
    }

    #[test]
    fn missing_vehicle_type_defaults_to_four_wheeler() {
        let raw = raw_from_json(r#"{"id":"v1","make":"Kia","model":"Seltos","price":1}"#);
        assert_eq!(normalize_vehicle(raw, 0, BASE).vehicle_type, VehicleType::FourWheeler);

        let bike = raw_from_json(
            r#"{"id":"b1","make":"Honda","model":"Activa","price":1,"vehicleType":"2-wheeler"}"#,
        );
        assert_eq!(normalize_vehicle(bike, 0, BASE).vehicle_type, VehicleType::TwoWheeler);
    }

    #[test]
    fn unknown_extra_fields_are_ignored() {
        let raw = raw_from_json(
            r#"{"id":"v1","make":"Kia","model":"Seltos","price":1,
                "dealerNotes":"ignore me","img_roof":"/roof.jpg"}"#,
        );
        let vehicle = normalize_vehicle(raw, 0, BASE);
        assert_eq!(vehicle.images.len(), 1);
        assert!(vehicle.images.contains_key(&ImageSlot::Roof));
    }
}
