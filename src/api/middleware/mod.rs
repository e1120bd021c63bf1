//! API middleware components

pub mod logging;
pub mod security;

pub use logging::logging_middleware;
pub use security::{security_headers_middleware, validate_request_path};
