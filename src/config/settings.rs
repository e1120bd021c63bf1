//! Catalog and auth settings resolved once at startup

use std::time::Duration;

use crate::domain::MapperOptions;

use super::env::EnvResolver;

pub const API_BASE_KEYS: &[&str] = &["WP_API_BASE", "PUBLIC_WP_API_BASE"];
pub const USERNAME_KEYS: &[&str] = &["WP_USERNAME"];
pub const APP_PASSWORD_KEYS: &[&str] = &["WP_APP_PASSWORD"];
pub const CACHE_TTL_KEYS: &[&str] = &["WP_CACHE_TTL_MS", "WP_CACHE_TTL"];
pub const TIMEOUT_KEYS: &[&str] = &["WP_TIMEOUT_MS"];
pub const FULL_SIZE_IMAGES_KEYS: &[&str] = &["WP_FULL_SIZE_IMAGES"];
pub const SCRUB_TITLE_DIMENSIONS_KEYS: &[&str] = &["WP_SCRUB_TITLE_DIMENSIONS"];

pub const AUTH_USER_KEYS: &[&str] = &["AUTH_USER", "ADMIN_USER"];
pub const AUTH_PASSWORD_KEYS: &[&str] = &["AUTH_PASSWORD", "ADMIN_PASSWORD"];
pub const AUTH_SECRET_KEYS: &[&str] = &["AUTH_SECRET", "TOKEN_SECRET"];
pub const AUTH_TOKEN_TTL_KEYS: &[&str] = &["AUTH_TOKEN_TTL_MS"];

/// Default freshness window for the catalog cache (5 minutes)
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_millis(5 * 60 * 1000);

/// Default lifetime of login tokens (12 hours)
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_millis(12 * 60 * 60 * 1000);

/// Upstream catalog settings
#[derive(Debug, Clone)]
pub struct CatalogSettings {
    pub api_base: Option<String>,
    pub username: Option<String>,
    pub app_password: Option<String>,
    pub cache_ttl: Duration,
    pub request_timeout: Option<Duration>,
    pub mapper: MapperOptions,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            api_base: None,
            username: None,
            app_password: None,
            cache_ttl: DEFAULT_CACHE_TTL,
            request_timeout: None,
            mapper: MapperOptions::default(),
        }
    }
}

impl CatalogSettings {
    pub fn from_resolver(resolver: &EnvResolver) -> Self {
        let defaults = MapperOptions::default();

        Self {
            api_base: resolver.resolve(API_BASE_KEYS),
            username: resolver.resolve(USERNAME_KEYS),
            app_password: resolver.resolve(APP_PASSWORD_KEYS),
            cache_ttl: parse_millis(resolver.resolve(CACHE_TTL_KEYS).as_deref(), DEFAULT_CACHE_TTL),
            request_timeout: resolver
                .resolve(TIMEOUT_KEYS)
                .map(|raw| parse_millis(Some(&raw), Duration::ZERO))
                .filter(|timeout| !timeout.is_zero()),
            mapper: MapperOptions::default()
                .with_full_size_images(
                    resolver.flag(FULL_SIZE_IMAGES_KEYS, defaults.full_size_images),
                )
                .with_scrub_title_dimensions(resolver.flag(
                    SCRUB_TITLE_DIMENSIONS_KEYS,
                    defaults.scrub_title_dimensions,
                )),
        }
    }
}

/// Login endpoint settings
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub user: Option<String>,
    pub password: Option<String>,
    pub secret: Option<String>,
    pub token_ttl: Duration,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            user: None,
            password: None,
            secret: None,
            token_ttl: DEFAULT_TOKEN_TTL,
        }
    }
}

impl AuthSettings {
    pub fn from_resolver(resolver: &EnvResolver) -> Self {
        Self {
            user: resolver.resolve(AUTH_USER_KEYS),
            password: resolver.resolve(AUTH_PASSWORD_KEYS),
            secret: resolver.resolve(AUTH_SECRET_KEYS),
            token_ttl: parse_millis(
                resolver.resolve(AUTH_TOKEN_TTL_KEYS).as_deref(),
                DEFAULT_TOKEN_TTL,
            ),
        }
    }
}

/// Parses a millisecond count. Unparsable or non-finite input yields
/// `default`; negative values clamp to zero.
pub fn parse_millis(raw: Option<&str>, default: Duration) -> Duration {
    let Some(value) = raw
        .map(str::trim)
        .and_then(|text| text.parse::<f64>().ok())
        .filter(|value| value.is_finite())
    else {
        return default;
    };

    if value <= 0.0 {
        return Duration::ZERO;
    }

    Duration::from_millis(value.round() as u64)
}
