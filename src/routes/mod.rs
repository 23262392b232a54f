// Route definitions

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

mod api;
mod pages;

pub fn create_router(app_state: AppState) -> Router {
    // JSON API routes. Handlers expect AppState via the State extractor.
    let api_router = Router::new()
        .route("/vehicles", get(api::list_vehicles))
        .route("/vehicles/:id", get(api::get_vehicle))
        .route("/banners", get(api::get_banners))
        // Filter store mutations; each responds with the canonical query
        // string so the client can replace the URL without a history push.
        .route("/filters/toggle", post(api::toggle_filter))
        .route("/filters/vehicle-type", post(api::set_vehicle_type))
        .route("/filters/sort", post(api::set_sort))
        .route("/filters/search", post(api::set_search_query))
        .route("/filters/clear", post(api::clear_filters))
        .with_state(app_state.clone());

    Router::new()
        // Server-rendered storefront pages
        .route("/", get(pages::listing_page))
        .route("/vehicle/:id", get(pages::detail_page))
        .nest("/api", api_router)
        .with_state(app_state)
}
