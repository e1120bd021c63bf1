//! Layered environment lookup with ordered fallback keys

use std::collections::HashMap;
use std::env;
use std::fmt::Debug;

/// A single source of environment-like key/value pairs
pub trait EnvSource: Send + Sync + Debug {
    fn get(&self, key: &str) -> Option<String>;
}

/// Values injected at compile time through `option_env!`
#[derive(Debug, Clone, Copy)]
pub struct BuildEnv {
    entries: &'static [(&'static str, Option<&'static str>)],
}

impl BuildEnv {
    pub const fn new(entries: &'static [(&'static str, Option<&'static str>)]) -> Self {
        Self { entries }
    }
}

impl EnvSource for BuildEnv {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .iter()
            .find(|(name, _)| *name == key)
            .and_then(|(_, value)| value.map(str::to_string))
    }
}

/// The process environment at lookup time
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

/// In-memory source, mostly useful for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    values: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl EnvSource for MapEnv {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

macro_rules! build_env {
    ($($key:literal),* $(,)?) => {
        &[$(($key, option_env!($key))),*]
    };
}

/// Keys that may be baked into the binary at build time
static BUILD_TIME_ENV: &[(&str, Option<&str>)] = build_env![
    "WP_API_BASE",
    "PUBLIC_WP_API_BASE",
    "WP_USERNAME",
    "WP_APP_PASSWORD",
    "WP_CACHE_TTL_MS",
    "WP_CACHE_TTL",
    "WP_TIMEOUT_MS",
    "WP_FULL_SIZE_IMAGES",
    "WP_SCRUB_TITLE_DIMENSIONS",
];

const FALSE_VALUES: [&str; 4] = ["false", "0", "off", "no"];

/// Resolves configuration values across ordered layers
///
/// Keys are tried in the order given; for each key every layer is consulted
/// in order. Blank values count as undefined.
#[derive(Debug)]
pub struct EnvResolver {
    layers: Vec<Box<dyn EnvSource>>,
}

impl EnvResolver {
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Build-time values first, then the process environment
    pub fn standard() -> Self {
        Self::new()
            .with_layer(BuildEnv::new(BUILD_TIME_ENV))
            .with_layer(ProcessEnv)
    }

    pub fn with_layer(mut self, layer: impl EnvSource + 'static) -> Self {
        self.layers.push(Box::new(layer));
        self
    }

    /// First defined value for any of `keys`
    pub fn resolve(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| {
            self.layers
                .iter()
                .filter_map(|layer| layer.get(key))
                .find(|value| !value.trim().is_empty())
        })
    }

    /// Boolean lookup: "false", "0", "off" and "no" are false, any other
    /// defined value is true
    pub fn flag(&self, keys: &[&str], default: bool) -> bool {
        match self.resolve(keys) {
            Some(value) => {
                let value = value.trim().to_ascii_lowercase();
                !FALSE_VALUES.contains(&value.as_str())
            }
            None => default,
        }
    }
}

impl Default for EnvResolver {
    fn default() -> Self {
        Self::standard()
    }
}
