//! Product endpoint handlers

use axum::extract::{Path, Query, State};
use serde::Deserialize;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{DomainError, ProductCard};
use crate::infrastructure::catalog::{DEFAULT_PRODUCT_LIMIT, MAX_PRODUCT_LIMIT};

#[derive(Debug, Default, Deserialize)]
pub struct ListProductsQuery {
    /// Kept as text so a malformed value falls back to the default
    pub limit: Option<String>,
}

impl ListProductsQuery {
    pub fn effective_limit(&self) -> usize {
        self.limit
            .as_deref()
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .unwrap_or(DEFAULT_PRODUCT_LIMIT)
            .clamp(1, MAX_PRODUCT_LIMIT)
    }
}

/// GET /api/products
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListProductsQuery>,
) -> Json<Vec<ProductCard>> {
    let limit = query.effective_limit();
    debug!(limit, "Listing products");

    Json(state.catalog_service.get_products(limit).await)
}

/// GET /api/products/{slug}
pub async fn get_product(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ProductCard>, ApiError> {
    debug!(slug = %slug, "Getting product");

    state
        .catalog_service
        .get_product_by_slug(&slug)
        .await
        .map(Json)
        .ok_or_else(|| {
            ApiError::from(DomainError::not_found(format!(
                "Product '{}' not found",
                slug
            )))
        })
}
