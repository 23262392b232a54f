// Configuration loading via the 'config' crate, with .env support.

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server_address: String,
    // Base URL of the remote marketplace API, e.g. https://apis.trustedvehicles.com/api/marketplace
    pub api_base_url: String,
    // Where the persisted filter state blob lives.
    pub filter_storage_path: String,
}

impl Settings {
    pub fn new() -> Result<Self> {
        dotenv::dotenv().ok(); // Load .env file if present

        let builder = Config::builder()
            // Add default values
            .set_default("server_address", "127.0.0.1:3000")?
            .set_default("api_base_url", "https://apis.trustedvehicles.com/api/marketplace")?
            .set_default("filter_storage_path", "data/vehicle-filter-storage.json")?
            // Load from a configuration file (e.g., config.toml)
            .add_source(File::with_name("config").required(false))
            // Load from environment variables (e.g., APP_SERVER_ADDRESS)
            .add_source(Environment::with_prefix("APP").separator("_"));

        let settings = builder.build()?.try_deserialize()?;
        Ok(settings)
    }
}
