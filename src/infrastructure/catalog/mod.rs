//! Catalog fetching and caching

mod cache;
mod service;

pub use cache::CatalogCache;
pub use service::{
    CatalogService, DEFAULT_PRODUCT_LIMIT, MAX_PRODUCT_LIMIT, PRODUCTS_PATH, PRODUCT_FIELDS,
};
