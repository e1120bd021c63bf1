//! Authenticated requests against the upstream catalog API

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine};

use super::http_client::{HttpClientTrait, HttpResponse};
use crate::config::CatalogSettings;
use crate::domain::DomainError;

const ACCEPT_JSON: &str = "application/json";

/// Builds URLs and headers for the upstream API and issues GET requests
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: Arc<dyn HttpClientTrait>,
    base_url: Option<String>,
    authorization: Option<String>,
}

impl UpstreamClient {
    pub fn new(http: Arc<dyn HttpClientTrait>, base_url: Option<String>) -> Self {
        let base_url = base_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());

        Self {
            http,
            base_url,
            authorization: None,
        }
    }

    pub fn from_settings(http: Arc<dyn HttpClientTrait>, settings: &CatalogSettings) -> Self {
        Self::new(http, settings.api_base.clone())
            .with_basic_auth(settings.username.as_deref(), settings.app_password.as_deref())
    }

    /// Enables Basic auth when both parts are present
    pub fn with_basic_auth(mut self, username: Option<&str>, app_password: Option<&str>) -> Self {
        self.authorization = match (username, app_password) {
            (Some(user), Some(password)) if !user.is_empty() && !password.is_empty() => {
                let encoded = STANDARD.encode(format!("{}:{}", user, password));
                Some(format!("Basic {}", encoded))
            }
            _ => None,
        };
        self
    }

    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Joins the base URL with `path` and appends URL-encoded query pairs
    pub fn build_url(&self, path: &str, query: &[(&str, String)]) -> Result<String, DomainError> {
        let base = self
            .base_url
            .as_deref()
            .ok_or_else(|| DomainError::configuration("Upstream API base URL is not configured"))?;

        let joined = if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        };

        let mut url = reqwest::Url::parse(&joined).map_err(|e| {
            DomainError::configuration(format!("Invalid upstream URL '{}': {}", joined, e))
        })?;

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();

            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        Ok(url.into())
    }

    pub fn headers(&self) -> Vec<(&str, &str)> {
        let mut headers = vec![("Accept", ACCEPT_JSON)];

        if let Some(authorization) = &self.authorization {
            headers.push(("Authorization", authorization.as_str()));
        }

        headers
    }

    /// GET `path` with auth headers; the raw response is returned as-is
    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<HttpResponse, DomainError> {
        let url = self.build_url(path, query)?;
        self.http.get(&url, self.headers()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::upstream::http_client::mock::MockHttpClient;

    fn client(base: Option<&str>) -> UpstreamClient {
        UpstreamClient::new(Arc::new(MockHttpClient::new()), base.map(str::to_string))
    }

    #[test]
    fn test_build_url_joins_base_and_path() {
        let client = client(Some("https://shop.example.com/wp-json/"));

        assert_eq!(
            client.build_url("/wc/v3/products", &[]).unwrap(),
            "https://shop.example.com/wp-json/wc/v3/products"
        );
        assert_eq!(
            client.build_url("wc/v3/products", &[]).unwrap(),
            "https://shop.example.com/wp-json/wc/v3/products"
        );
    }

    #[test]
    fn test_build_url_encodes_query() {
        let client = client(Some("https://shop.example.com/wp-json"));
        let url = client
            .build_url(
                "/wc/v3/products",
                &[("slug", "olio & tela".to_string()), ("per_page", "1".to_string())],
            )
            .unwrap();

        assert_eq!(
            url,
            "https://shop.example.com/wp-json/wc/v3/products?slug=olio+%26+tela&per_page=1"
        );
    }

    #[test]
    fn test_build_url_without_base_is_configuration_error() {
        let result = client(None).build_url("/wc/v3/products", &[]);
        assert!(matches!(result, Err(DomainError::Configuration { .. })));

        let blank = client(Some("   "));
        assert!(!blank.is_configured());
    }

    #[test]
    fn test_headers_without_credentials() {
        let client = client(Some("https://shop.example.com"));
        assert_eq!(client.headers(), vec![("Accept", "application/json")]);

        let partial = client.with_basic_auth(Some("gallery"), None);
        assert_eq!(partial.headers().len(), 1);
    }

    #[test]
    fn test_headers_with_basic_auth() {
        let client =
            client(Some("https://shop.example.com")).with_basic_auth(Some("user"), Some("pass"));

        assert_eq!(
            client.headers(),
            vec![
                ("Accept", "application/json"),
                ("Authorization", "Basic dXNlcjpwYXNz"),
            ]
        );
    }

    #[tokio::test]
    async fn test_get_issues_request_with_headers() {
        let http = Arc::new(MockHttpClient::new().with_response(200, "[]"));
        let client = UpstreamClient::new(http.clone(), Some("https://shop.example.com".to_string()))
            .with_basic_auth(Some("user"), Some("pass"));

        let response = client
            .get("/wc/v3/products", &[("per_page", "5".to_string())])
            .await
            .unwrap();

        assert_eq!(response.body, "[]");

        let requests = http.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].query("per_page").as_deref(), Some("5"));
        assert_eq!(requests[0].header("authorization"), Some("Basic dXNlcjpwYXNz"));
        assert_eq!(requests[0].header("accept"), Some("application/json"));
    }
}
