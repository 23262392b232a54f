use anyhow::{Context, Result};
use axum::{extract::FromRef, Router};
use reqwest::Client;
use std::{net::SocketAddr, path::PathBuf, sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::services::ServeDir;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalogue::Catalogue;
use crate::config::Settings;
use crate::filter_store::FilterStore;
use crate::storage::FilterStorage;

// Declare modules
mod catalogue;
mod config;
mod engine;
mod error;
mod filter_store;
mod marketplace_api;
mod models;
mod routes;
mod storage;
mod url_sync;

// Fixed timeout for calls to the remote marketplace API. No automatic
// retry; a failed catalogue fetch surfaces as a page-level error.
const API_TIMEOUT: Duration = Duration::from_secs(30);

// Define the application state struct
#[derive(Clone, FromRef)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub http_client: Arc<Client>,
    pub catalogue: Arc<Catalogue>,
    pub filter_store: Arc<RwLock<FilterStore>>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file first. Ignore errors (e.g., file not found)
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "vehiclemart_rust=info,tower_http=info".into()))
        .with(fmt::layer())
        .init();

    tracing::info!("Initializing VehicleMart Rust server...");

    // Load configuration
    let settings = match Settings::new() {
        Ok(s) => {
            tracing::info!("Configuration loaded successfully.");
            s
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e); // Propagate the error
        }
    };
    let shared_settings = Arc::new(settings);

    // Create the shared reqwest client used for all marketplace API calls
    let http_client = Arc::new(
        Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36")
            .timeout(API_TIMEOUT)
            .build()
            .context("Failed to build shared reqwest client")?,
    );
    tracing::info!("Shared HTTP client created.");

    // Hydrate the filter store from durable storage before anything can
    // observe it; URL synchronization is gated on this having happened.
    let filter_storage = FilterStorage::new(PathBuf::from(&shared_settings.filter_storage_path));
    let filter_store = Arc::new(RwLock::new(FilterStore::new(Some(filter_storage))));
    tracing::info!("Filter store hydrated.");

    let catalogue = Arc::new(Catalogue::new(
        Arc::clone(&http_client),
        Arc::clone(&shared_settings),
    ));

    // Create the application state instance
    let app_state = AppState {
        settings: shared_settings,
        http_client,
        catalogue,
        filter_store,
    };

    let router: Router = routes::create_router(app_state.clone());

    // Combine the router with static file serving
    let app = router.nest_service("/static", ServeDir::new("static"));

    // Parse the server address from settings
    let addr: SocketAddr = match app_state.settings.server_address.parse() {
        Ok(a) => a,
        Err(e) => {
            tracing::error!(
                "Invalid server address format in configuration ('{}'): {}",
                app_state.settings.server_address,
                e
            );
            return Err(anyhow::anyhow!(
                "Invalid server address format: {}",
                app_state.settings.server_address
            ));
        }
    };

    // Create a TCP listener
    let listener = match TcpListener::bind(&addr).await {
        Ok(l) => {
            tracing::info!("Server listening on {}", addr);
            l
        }
        Err(e) => {
            tracing::error!("Failed to bind to address {}: {}", addr, e);
            return Err(e.into());
        }
    };

    // Run the server
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
