// Handlers for backend API endpoints

use axum::{
    extract::{Json as JsonExtract, Path, RawQuery, State},
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};

use crate::{
    engine,
    error::AppError,
    models::{Filters, MultiFilterField, SortOption, Vehicle, VehicleType},
    url_sync, AppState,
};

// --- Response Wrappers ---

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VehicleListResponse {
    vehicles: Vec<Vehicle>,
    count: usize,
    total: usize,
}

// Returned by every filter mutation: the canonical query string the
// client applies via history.replaceState (the URL write path).
#[derive(Serialize)]
struct FilterResponse {
    success: bool,
    query: String,
}

// --- Request Structs ---

#[derive(Deserialize)]
pub struct ToggleRequest {
    field: MultiFilterField,
    value: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleTypeRequest {
    vehicle_type: VehicleType,
}

#[derive(Deserialize)]
pub struct SortRequest {
    sort: SortOption,
}

#[derive(Deserialize)]
pub struct SearchRequest {
    query: String,
}

// --- API Handlers ---

// GET /api/vehicles - the filtered, sorted catalogue. Accepts the same
// query keys as the listing page URL; an empty query returns everything
// of the default vehicle type.
pub async fn list_vehicles(
    State(app_state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!("API call: list_vehicles");

    let vehicles = app_state.catalogue.vehicles().await?;

    let seed = url_sync::parse_query(query.as_deref().unwrap_or(""));
    let mut filters = Filters::default();
    if let Some(vehicle_type) = seed.vehicle_type {
        filters.vehicle_type = vehicle_type;
    }
    for (field, values) in &seed.multi {
        *filters.field_mut(*field) = values.clone();
    }
    let sort = seed.sort.unwrap_or_default();

    let filtered = engine::filter_and_sort(&vehicles, &filters, sort, "");
    Ok(Json(VehicleListResponse {
        count: filtered.len(),
        total: vehicles.len(),
        vehicles: filtered,
    }))
}

pub async fn get_vehicle(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!("API call: get_vehicle for id: {}", id);
    let vehicle = app_state.catalogue.vehicle_by_id(&id).await?;
    Ok(Json(vehicle))
}

pub async fn get_banners(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!("API call: get_banners");
    let banners = app_state.catalogue.banners().await?;
    Ok(Json(banners))
}

// Serialize the store's current state for the response. Callers hold the
// write lock already, so the snapshot is consistent.
fn filter_response(store: &crate::filter_store::FilterStore) -> Json<FilterResponse> {
    Json(FilterResponse {
        success: true,
        query: url_sync::to_query_string(store.filters(), store.sort()),
    })
}

pub async fn toggle_filter(
    State(app_state): State<AppState>,
    JsonExtract(req): JsonExtract<ToggleRequest>,
) -> impl IntoResponse {
    tracing::info!("API call: toggle_filter {} = {}", req.field.as_str(), req.value);
    let mut store = app_state.filter_store.write().await;
    store.toggle_multi_filter(req.field, &req.value);
    filter_response(&store)
}

pub async fn set_vehicle_type(
    State(app_state): State<AppState>,
    JsonExtract(req): JsonExtract<VehicleTypeRequest>,
) -> impl IntoResponse {
    tracing::info!("API call: set_vehicle_type {}", req.vehicle_type);
    let mut store = app_state.filter_store.write().await;
    store.set_vehicle_type(req.vehicle_type);
    filter_response(&store)
}

pub async fn set_sort(
    State(app_state): State<AppState>,
    JsonExtract(req): JsonExtract<SortRequest>,
) -> impl IntoResponse {
    tracing::info!("API call: set_sort {}", req.sort);
    let mut store = app_state.filter_store.write().await;
    store.set_sort(req.sort);
    filter_response(&store)
}

pub async fn set_search_query(
    State(app_state): State<AppState>,
    JsonExtract(req): JsonExtract<SearchRequest>,
) -> impl IntoResponse {
    tracing::info!("API call: set_search_query");
    let mut store = app_state.filter_store.write().await;
    store.set_search_query(&req.query);
    filter_response(&store)
}

pub async fn clear_filters(State(app_state): State<AppState>) -> impl IntoResponse {
    tracing::info!("API call: clear_filters");
    let mut store = app_state.filter_store.write().await;
    store.clear_filters();
    filter_response(&store)
}
