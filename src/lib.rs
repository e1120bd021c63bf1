//! Gallery API
//!
//! Backend for a content gallery site:
//! - Product catalog proxied from a headless shop API, normalized into
//!   display cards and cached in memory with stale fallback
//! - Admin login issuing HMAC-signed tokens

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use config::{AuthSettings, CatalogSettings, EnvResolver};
use domain::ProductMapper;
use infrastructure::{
    auth::LoginService,
    catalog::{CatalogCache, CatalogService},
    upstream::{HttpClient, HttpClientTrait, UpstreamClient},
};
use tracing::{info, warn};

/// Create the application state from the process environment
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_resolver(&EnvResolver::standard()).await
}

/// Create the application state from an explicit resolver
pub async fn create_app_state_with_resolver(resolver: &EnvResolver) -> anyhow::Result<AppState> {
    let catalog_service = create_catalog_service(&CatalogSettings::from_resolver(resolver))?;
    let login_service = LoginService::from_settings(&AuthSettings::from_resolver(resolver));

    Ok(AppState::new(
        Arc::new(catalog_service),
        Arc::new(login_service),
    ))
}

/// Wire the upstream client, cache and mapper for the catalog
pub fn create_catalog_service(settings: &CatalogSettings) -> anyhow::Result<CatalogService> {
    let http: Arc<dyn HttpClientTrait> = match settings.request_timeout {
        Some(timeout) => Arc::new(HttpClient::with_timeout(timeout)?),
        None => Arc::new(HttpClient::new()),
    };

    let client = UpstreamClient::from_settings(http, settings);

    match client.base_url() {
        Some(base_url) => info!(
            base_url = %base_url,
            cache_ttl_ms = settings.cache_ttl.as_millis() as u64,
            authenticated = settings.username.is_some() && settings.app_password.is_some(),
            "Catalog upstream configured"
        ),
        None => warn!("WP_API_BASE is not set, product listings will be empty"),
    }

    Ok(CatalogService::new(
        client,
        Arc::new(CatalogCache::new(settings.cache_ttl)),
        ProductMapper::new(settings.mapper),
    ))
}
