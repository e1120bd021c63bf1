//! Catalog service: upstream fetch → mapping → cache

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use super::cache::CatalogCache;
use crate::domain::{DomainError, ProductCard, ProductMapper, RawProduct};
use crate::infrastructure::upstream::{HttpResponse, UpstreamClient};

pub const PRODUCTS_PATH: &str = "/wc/v3/products";

/// Field projection requested from the upstream API
pub const PRODUCT_FIELDS: &str =
    "id,name,slug,permalink,images,price,regular_price,dimensions,description,attributes";

/// Page size used when callers do not ask for one
pub const DEFAULT_PRODUCT_LIMIT: usize = 100;

/// Largest page the upstream API serves in one request
pub const MAX_PRODUCT_LIMIT: usize = 100;

/// Serves product cards from the upstream catalog
///
/// Upstream failures never reach callers: listing degrades to the last
/// cached page (or nothing) and single lookups to `None`.
#[derive(Debug)]
pub struct CatalogService {
    client: UpstreamClient,
    cache: Arc<CatalogCache>,
    mapper: ProductMapper,
}

impl CatalogService {
    pub fn new(client: UpstreamClient, cache: Arc<CatalogCache>, mapper: ProductMapper) -> Self {
        Self {
            client,
            cache,
            mapper,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_configured()
    }

    /// Newest products first, at most `limit` of them
    ///
    /// `limit` is clamped to `1..=MAX_PRODUCT_LIMIT`.
    #[instrument(skip(self))]
    pub async fn get_products(&self, limit: usize) -> Vec<ProductCard> {
        if !self.client.is_configured() {
            debug!("Upstream catalog not configured, returning no products");
            return Vec::new();
        }

        let limit = limit.clamp(1, MAX_PRODUCT_LIMIT);

        if let Some(fresh) = self.cache.get_cached_products(limit).await {
            debug!(count = fresh.len(), "Catalog cache hit");
            return fresh;
        }

        let stale = self.cache.get_stale_products(limit).await;

        match self.fetch_products(limit).await {
            Ok(products) => {
                debug!(count = products.len(), "Fetched catalog from upstream");
                self.cache.set_cache(products.clone(), limit).await;
                products
            }
            Err(e) => {
                warn!(
                    error = %e,
                    stale_available = stale.is_some(),
                    "Catalog fetch failed, serving fallback"
                );
                stale.unwrap_or_default()
            }
        }
    }

    /// Single product by exact slug; not cached
    #[instrument(skip(self))]
    pub async fn get_product_by_slug(&self, slug: &str) -> Option<ProductCard> {
        let slug = slug.trim();

        if slug.is_empty() || !self.client.is_configured() {
            return None;
        }

        match self.fetch_product_by_slug(slug).await {
            Ok(product) => product,
            Err(e) => {
                warn!(error = %e, "Product lookup failed");
                None
            }
        }
    }

    async fn fetch_products(&self, limit: usize) -> Result<Vec<ProductCard>, DomainError> {
        let query = [
            ("per_page", limit.to_string()),
            ("order", "desc".to_string()),
            ("orderby", "date".to_string()),
            ("_fields", PRODUCT_FIELDS.to_string()),
        ];

        let response = self.client.get(PRODUCTS_PATH, &query).await?;
        let raws = parse_products(response)?;

        Ok(self.mapper.map_all(&raws))
    }

    async fn fetch_product_by_slug(&self, slug: &str) -> Result<Option<ProductCard>, DomainError> {
        let query = [
            ("slug", slug.to_string()),
            ("per_page", "1".to_string()),
            ("_fields", PRODUCT_FIELDS.to_string()),
        ];

        let response = self.client.get(PRODUCTS_PATH, &query).await?;
        let raws = parse_products(response)?;

        Ok(raws
            .first()
            .and_then(|raw| self.mapper.map(raw))
            .filter(ProductCard::has_image))
    }
}

/// Decodes a product list. The body must be a JSON array; entries that do
/// not look like products are skipped.
fn parse_products(response: HttpResponse) -> Result<Vec<RawProduct>, DomainError> {
    if !response.is_success() {
        return Err(DomainError::upstream_status(
            response.status,
            format!("HTTP {}", response.status),
        ));
    }

    let values: Vec<serde_json::Value> = response.json()?;

    Ok(values
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<RawProduct>(value) {
            Ok(raw) => Some(raw),
            Err(e) => {
                debug!(error = %e, "Skipping malformed product record");
                None
            }
        })
        .collect())
}
