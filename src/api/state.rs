//! Application state for shared services

use std::sync::Arc;

use crate::domain::ProductCard;
use crate::infrastructure::auth::{IssuedToken, LoginError, LoginService};
use crate::infrastructure::catalog::CatalogService;

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub catalog_service: Arc<dyn CatalogServiceTrait>,
    pub login_service: Arc<dyn LoginServiceTrait>,
}

/// Trait for catalog service operations
#[async_trait::async_trait]
pub trait CatalogServiceTrait: Send + Sync {
    async fn get_products(&self, limit: usize) -> Vec<ProductCard>;
    async fn get_product_by_slug(&self, slug: &str) -> Option<ProductCard>;
    fn is_configured(&self) -> bool;
}

/// Trait for login service operations
pub trait LoginServiceTrait: Send + Sync {
    fn login(&self, user: &str, password: &str) -> Result<IssuedToken, LoginError>;
    fn verify(&self, token: &str) -> bool;
    fn is_configured(&self) -> bool;
}

#[async_trait::async_trait]
impl CatalogServiceTrait for CatalogService {
    async fn get_products(&self, limit: usize) -> Vec<ProductCard> {
        CatalogService::get_products(self, limit).await
    }

    async fn get_product_by_slug(&self, slug: &str) -> Option<ProductCard> {
        CatalogService::get_product_by_slug(self, slug).await
    }

    fn is_configured(&self) -> bool {
        CatalogService::is_configured(self)
    }
}

impl LoginServiceTrait for LoginService {
    fn login(&self, user: &str, password: &str) -> Result<IssuedToken, LoginError> {
        LoginService::login(self, user, password)
    }

    fn verify(&self, token: &str) -> bool {
        LoginService::verify(self, token)
    }

    fn is_configured(&self) -> bool {
        LoginService::is_configured(self)
    }
}

impl AppState {
    /// Create new application state with provided services
    pub fn new(
        catalog_service: Arc<dyn CatalogServiceTrait>,
        login_service: Arc<dyn LoginServiceTrait>,
    ) -> Self {
        Self {
            catalog_service,
            login_service,
        }
    }
}
