use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    cache::ResponseCache,
    config::Config,
    controller::{AppController, ControllerSettings},
    services::{tmdb::CatalogTransport, CatalogService, TmdbClient},
    storage::{create_redis_client, RedisStore, Storage},
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<Mutex<AppController>>,
}

impl AppState {
    pub fn new(controller: AppController) -> Self {
        Self {
            controller: Arc::new(Mutex::new(controller)),
        }
    }

    /// Wires the controller from an explicit transport and store
    pub async fn build(
        transport: Arc<dyn CatalogTransport>,
        storage: Storage,
        api_url: &str,
        settings: ControllerSettings,
        cache_ttl: std::time::Duration,
    ) -> anyhow::Result<Self> {
        let cache = ResponseCache::new(transport, storage.clone(), cache_ttl);
        let catalog = CatalogService::new(Arc::new(cache), api_url);

        let mut controller = AppController::new(storage, catalog, settings);
        controller.restore().await?;

        Ok(Self::new(controller))
    }

    /// Production wiring: TMDB over HTTPS, Redis when configured
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let storage = match &config.redis_url {
            Some(url) => {
                let client = create_redis_client(url)?;
                tracing::info!("Using Redis storage");
                Storage::new(Arc::new(RedisStore::new(client)))
            }
            None => {
                tracing::info!("REDIS_URL not set, using in-memory storage");
                Storage::in_memory()
            }
        };

        let transport = Arc::new(TmdbClient::new(config.tmdb_api_key.clone()));

        Self::build(
            transport,
            storage,
            &config.tmdb_api_url,
            ControllerSettings::from(config),
            config.cache_ttl(),
        )
        .await
    }
}
