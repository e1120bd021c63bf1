//! Upstream catalog API access

mod client;
mod http_client;

pub use client::UpstreamClient;
pub use http_client::{HttpClient, HttpClientTrait, HttpResponse};

#[cfg(test)]
pub use http_client::mock;
