//! Security headers and request path screening

use axum::{
    body::Body,
    http::{header, HeaderValue, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::types::ApiError;

/// Adds security headers to every response and rejects suspicious paths
pub async fn security_headers_middleware(request: Request<Body>, next: Next) -> Response {
    let mut response = match validate_request_path(request.uri().path()) {
        Ok(()) => next.run(request).await,
        Err(error) => error.into_response(),
    };

    let headers = response.headers_mut();

    headers.insert(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
    );
    headers.insert(
        header::STRICT_TRANSPORT_SECURITY,
        HeaderValue::from_static("max-age=31536000; includeSubDomains"),
    );

    // Handlers may opt into caching by setting their own value
    if !headers.contains_key(header::CACHE_CONTROL) {
        headers.insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store, no-cache, must-revalidate"),
        );
    }

    response
}

/// Rejects traversal sequences and NUL bytes before routing
pub fn validate_request_path(path: &str) -> Result<(), ApiError> {
    if path.contains("..") || path.contains("//") {
        return Err(ApiError::bad_request("Invalid path: path traversal detected"));
    }

    if path.contains('\0') || path.contains("%00") {
        return Err(ApiError::bad_request("Invalid request: prohibited characters"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_validate_request_path_ok() {
        assert!(validate_request_path("/api/products").is_ok());
        assert!(validate_request_path("/api/products/oleo-marina-24x36").is_ok());
    }

    #[test]
    fn test_validate_request_path_traversal() {
        let err = validate_request_path("/api/products/../../etc/passwd").unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        assert!(validate_request_path("/api//products").is_err());
    }

    #[test]
    fn test_validate_request_path_null_byte() {
        assert!(validate_request_path("/api/products/x%00.json").is_err());
    }
}
