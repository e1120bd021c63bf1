//! Configuration - server/logging settings and layered environment lookup

mod app_config;
pub mod env;
mod settings;

pub use app_config::{AppConfig, LogFormat, LoggingConfig, ServerConfig};
pub use env::{EnvResolver, EnvSource, MapEnv};
pub use settings::{
    parse_millis, AuthSettings, CatalogSettings, DEFAULT_CACHE_TTL, DEFAULT_TOKEN_TTL,
};
