//! One-shot catalog commands

use clap::Args;
use tracing::warn;

use crate::api::state::CatalogServiceTrait;
use crate::config::AppConfig;
use crate::domain::ProductCard;
use crate::infrastructure::catalog::DEFAULT_PRODUCT_LIMIT;
use crate::infrastructure::logging;

#[derive(Args, Debug)]
pub struct ProductsArgs {
    /// Maximum number of products to fetch
    #[arg(short, long, default_value_t = DEFAULT_PRODUCT_LIMIT)]
    pub limit: usize,
}

#[derive(Args, Debug)]
pub struct ProductArgs {
    /// Product slug
    pub slug: String,
}

/// Print the catalog page as pretty JSON
pub async fn run_products(args: ProductsArgs) -> anyhow::Result<()> {
    let state = init().await?;
    let products = state.catalog_service.get_products(args.limit).await;

    println!("{}", render(&products)?);
    Ok(())
}

/// Print one product, failing when it does not exist
pub async fn run_product(args: ProductArgs) -> anyhow::Result<()> {
    let state = init().await?;
    let product = find_product(state.catalog_service.as_ref(), &args.slug).await?;

    println!("{}", render(&product)?);
    Ok(())
}

async fn init() -> anyhow::Result<crate::api::AppState> {
    dotenvy::dotenv().ok();

    let (config, load_error) = AppConfig::load_or_default();
    logging::init_cli_logging(&config.logging);
    if let Some(e) = load_error {
        warn!(error = %e, "Failed to load configuration, using defaults");
    }

    crate::create_app_state().await
}

async fn find_product(catalog: &dyn CatalogServiceTrait, slug: &str) -> anyhow::Result<ProductCard> {
    if !catalog.is_configured() {
        anyhow::bail!("WP_API_BASE is not set");
    }

    catalog
        .get_product_by_slug(slug)
        .await
        .ok_or_else(|| anyhow::anyhow!("Product '{}' not found", slug))
}

fn render<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use serde_json::json;

    use crate::domain::ProductMapper;
    use crate::infrastructure::catalog::{CatalogCache, CatalogService};
    use crate::infrastructure::upstream::mock::MockHttpClient;
    use crate::infrastructure::upstream::UpstreamClient;

    fn service(http: Arc<MockHttpClient>, base: Option<&str>) -> CatalogService {
        CatalogService::new(
            UpstreamClient::new(http, base.map(str::to_string)),
            Arc::new(CatalogCache::new(Duration::from_secs(60))),
            ProductMapper::default(),
        )
    }

    #[tokio::test]
    async fn test_find_product_found() {
        let http = Arc::new(MockHttpClient::new().with_json(
            200,
            json!([{
                "id": 3,
                "name": "Blue hour",
                "slug": "blue-hour",
                "permalink": "https://shop.example.com/product/blue-hour",
                "images": [{ "src": "https://shop.example.com/blue-hour.jpg" }]
            }]),
        ));
        let catalog = service(http, Some("https://shop.example.com/wp-json"));

        let product = find_product(&catalog, "blue-hour").await.unwrap();
        assert_eq!(product.title, "Blue hour");

        let rendered = render(&product).unwrap();
        assert!(rendered.contains("\"slug\": \"blue-hour\""));
    }

    #[tokio::test]
    async fn test_find_product_missing_is_error() {
        let http = Arc::new(MockHttpClient::new().with_json(200, json!([])));
        let catalog = service(http, Some("https://shop.example.com/wp-json"));

        let err = find_product(&catalog, "nowhere").await.unwrap_err();
        assert_eq!(err.to_string(), "Product 'nowhere' not found");
    }

    #[tokio::test]
    async fn test_find_product_unconfigured_is_error() {
        let catalog = service(Arc::new(MockHttpClient::new()), None);

        let err = find_product(&catalog, "blue-hour").await.unwrap_err();
        assert!(err.to_string().contains("WP_API_BASE"));
    }
}
