use askama::Template;
use axum::{
    extract::{Path, RawQuery, State},
    response::{Html, IntoResponse},
};
use futures::future::join;

use crate::{
    engine,
    error::AppError,
    models::{Banner, Vehicle},
    url_sync, AppState,
};

// One card in the listing grid, pre-formatted for the template.
pub struct VehicleCard {
    pub id: String,
    pub title: String,
    pub variant: String,
    pub price: String,
    pub kms: String,
    pub fuel: String,
    pub transmission: String,
    pub image: String,
    pub verified: bool,
}

#[derive(Template)]
#[template(path = "listing.html")]
struct ListingTemplate {
    vehicles: Vec<VehicleCard>,
    banners: Vec<Banner>,
    result_count: usize,
    total: usize,
    vehicle_type: String,
    sort: String,
    search_query: String,
    // Canonical serialized state, applied client-side via replaceState.
    query_string: String,
}

pub struct SpecRow {
    pub label: &'static str,
    pub value: String,
}

pub struct GalleryImage {
    pub slot: String,
    pub url: String,
}

#[derive(Template)]
#[template(path = "detail.html")]
struct DetailTemplate {
    title: String,
    price: String,
    status: String,
    specs: Vec<SpecRow>,
    images: Vec<GalleryImage>,
}

fn format_price(price: u64) -> String {
    format!("₹{}", price)
}

fn card_for(vehicle: &Vehicle) -> VehicleCard {
    VehicleCard {
        id: vehicle.id.clone(),
        title: vehicle.title(),
        variant: vehicle.variant.clone().unwrap_or_default(),
        price: format_price(vehicle.price),
        kms: format!("{} km", vehicle.kms_driven),
        fuel: vehicle.fuel_type.clone().unwrap_or_default(),
        transmission: vehicle.transmission.clone().unwrap_or_default(),
        image: vehicle.primary_image().unwrap_or_default().to_string(),
        verified: vehicle.verified.unwrap_or(false),
    }
}

// The listing page: URL read path, engine run, render.
pub async fn listing_page(
    State(app_state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!("[HANDLER] / - Listing page requested");

    // Vehicles and banners are independent fetches; a banner failure must
    // not take the page down.
    let (vehicles, banners) = join(
        app_state.catalogue.vehicles(),
        app_state.catalogue.banners(),
    )
    .await;
    let vehicles = vehicles?;
    let banners = banners.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Banner fetch failed, rendering without banners");
        Vec::new()
    });

    let (filtered, snapshot, query_string) = {
        let mut store = app_state.filter_store.write().await;

        // Read path: seed the store from the URL, once per mount, only
        // after hydration so defaults never clobber a bookmarked URL.
        let seed = url_sync::parse_query(query.as_deref().unwrap_or(""));
        if store.is_hydrated() && !seed.is_empty() {
            store.apply_url_seed(&seed);
        }

        let snapshot = store.snapshot();
        let filtered = engine::filter_and_sort(
            &vehicles,
            &snapshot.filters,
            snapshot.sort,
            &snapshot.search_query,
        );
        store.set_result_count(filtered.len());

        // Write path: serialize the post-seed state for replaceState.
        let query_string = if store.is_hydrated() {
            url_sync::to_query_string(&snapshot.filters, snapshot.sort)
        } else {
            String::new()
        };
        (filtered, snapshot, query_string)
    };

    let template = ListingTemplate {
        result_count: filtered.len(),
        total: vehicles.len(),
        vehicles: filtered.iter().map(card_for).collect(),
        banners,
        vehicle_type: snapshot.filters.vehicle_type.to_string(),
        sort: snapshot.sort.as_str().to_string(),
        search_query: snapshot.search_query,
        query_string,
    };
    match template.render() {
        Ok(html) => Ok(Html(html)),
        Err(e) => {
            tracing::error!("Failed to render listing template: {}", e);
            Err(AppError::InternalServerError(anyhow::Error::new(e)))
        }
    }
}

// The vehicle detail page, with the full image gallery and spec table.
pub async fn detail_page(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!("[HANDLER] /vehicle/:id - Detail page requested for {}", id);

    let vehicle = app_state.catalogue.vehicle_by_id(&id).await?;

    let mut specs = vec![
        SpecRow { label: "Kms driven", value: format!("{} km", vehicle.kms_driven) },
        SpecRow { label: "Vehicle type", value: vehicle.vehicle_type.to_string() },
    ];
    let optional_rows: [(&'static str, Option<&String>); 9] = [
        ("Fuel type", vehicle.fuel_type.as_ref()),
        ("Transmission", vehicle.transmission.as_ref()),
        ("Ownership", vehicle.ownership.as_ref()),
        ("RTO", vehicle.rto_state.as_ref()),
        ("Registration no.", vehicle.reg_number.as_ref()),
        ("Insurance", vehicle.insurance.as_ref()),
        ("Service history", vehicle.service_history.as_ref()),
        ("Colour", vehicle.color.as_ref()),
        ("Variant", vehicle.variant.as_ref()),
    ];
    for (label, value) in optional_rows {
        if let Some(value) = value {
            specs.push(SpecRow { label, value: value.clone() });
        }
    }

    let images = vehicle
        .images
        .iter()
        .map(|(slot, url)| GalleryImage {
            slot: slot.api_key().to_string(),
            url: url.clone(),
        })
        .collect();

    let template = DetailTemplate {
        title: vehicle.title(),
        price: format_price(vehicle.price),
        status: vehicle.status.clone().unwrap_or_else(|| "For Sale".to_string()),
        specs,
        images,
    };
    match template.render() {
        Ok(html) => Ok(Html(html)),
        Err(e) => {
            tracing::error!("Failed to render detail template: {}", e);
            Err(AppError::InternalServerError(anyhow::Error::new(e)))
        }
    }
}
