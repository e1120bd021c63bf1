//! Public catalog endpoints

pub mod products;

use axum::{routing::get, Router};

use super::state::AppState;

/// Create catalog router
pub fn create_catalog_router() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::list_products))
        .route("/products/{slug}", get(products::get_product))
}
