// Session-scoped, in-memory view of the remote catalogue. The cache lives
// for the life of the process (a page reload in spirit); there is no
// invalidation and no request de-duplication, so concurrent first callers
// may each fetch once. Every fetch is idempotent so that is harmless.

use crate::config::Settings;
use crate::marketplace_api::{self, MarketplaceError};
use crate::models::{Banner, Vehicle};
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct Catalogue {
    client: Arc<Client>,
    settings: Arc<Settings>,
    vehicles: RwLock<Option<Arc<Vec<Vehicle>>>>,
}

// Loose, type-coercing id comparison: "7" matches 7, exact strings match
// themselves. The API is not consistent about id types across endpoints.
fn ids_match(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

impl Catalogue {
    pub fn new(client: Arc<Client>, settings: Arc<Settings>) -> Self {
        Catalogue {
            client,
            settings,
            vehicles: RwLock::new(None),
        }
    }

    // Full normalized catalogue, fetched on first use and cached for the
    // session afterwards.
    pub async fn vehicles(&self) -> Result<Arc<Vec<Vehicle>>, MarketplaceError> {
        if let Some(cached) = self.vehicles.read().await.as_ref() {
            return Ok(Arc::clone(cached));
        }

        let fetched = Arc::new(
            marketplace_api::fetch_vehicles(&self.client, &self.settings.api_base_url).await?,
        );
        *self.vehicles.write().await = Some(Arc::clone(&fetched));
        Ok(fetched)
    }

    // Cached lookup with loose id equality, falling back to a direct
    // single-item fetch when the id is not in the cached collection.
    pub async fn vehicle_by_id(&self, id: &str) -> Result<Vehicle, MarketplaceError> {
        let vehicles = self.vehicles().await?;
        if let Some(found) = vehicles.iter().find(|v| ids_match(&v.id, id)) {
            return Ok(found.clone());
        }

        tracing::debug!(id, "Vehicle not in cached catalogue, fetching directly");
        marketplace_api::fetch_vehicle_by_id(&self.client, &self.settings.api_base_url, id).await
    }

    // Banners are small and change independently of the catalogue; no caching.
    pub async fn banners(&self) -> Result<Vec<Banner>, MarketplaceError> {
        marketplace_api::fetch_banners(&self.client, &self.settings.api_base_url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loose_id_equality_coerces_numbers() {
        assert!(ids_match("7", "7"));
        assert!(ids_match("7", "007"));
        assert!(ids_match("abc-1", "abc-1"));
        assert!(!ids_match("7", "8"));
        assert!(!ids_match("abc-1", "abc-2"));
        assert!(!ids_match("7", "seven"));
    }
}
