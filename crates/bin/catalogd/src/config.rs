//! Daemon settings read from `catalog.toml` and `CATALOG_*` variables.
//!
//! The file is optional and every key has a default. Variables win over the
//! file; `CATALOG_CONFIG` points at a different file.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

const DEFAULT_PATH: &str = "catalog.toml";
const DEFAULT_FILTER: &str =
    "catalogd=info,catalog_app=info,catalog_adapter_http_axum=info,tower_http=debug";

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub log: LogConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Socket the HTTP listener binds, e.g. `"127.0.0.1:8080"`.
    pub bind: SocketAddr,
}

/// Product repository implementation picked at startup.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    /// Process-local; nothing survives a restart.
    Memory,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "memory" => Ok(Self::Memory),
            other => Err(ConfigError::Invalid(format!(
                "unknown storage backend {other:?}, expected \"sqlite\" or \"memory\""
            ))),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// sqlx connection string. Unused by the memory backend.
    pub url: String,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// `EnvFilter` directives.
    pub filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 3000),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Sqlite,
            url: "sqlite:catalog.db?mode=rwc".to_string(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Read the config file, apply process environment overrides and check
    /// the result.
    ///
    /// # Errors
    ///
    /// Fails when the file is unreadable or malformed, or when an override
    /// or the final configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let lookup = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());
        let path = lookup("CATALOG_CONFIG").unwrap_or_else(|| DEFAULT_PATH.to_string());

        let mut config = Self::read(Path::new(&path))?;
        config.override_with(lookup)?;
        config.check()?;
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => return Err(ConfigError::Read(err)),
        };
        Ok(toml::from_str(&text)?)
    }

    /// Apply `CATALOG_*` overrides fetched through `lookup`.
    ///
    /// `CATALOG_BIND` sets the whole socket; `CATALOG_HOST` and
    /// `CATALOG_PORT` then adjust one half of it. `RUST_LOG` beats
    /// `CATALOG_LOG`.
    fn override_with(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(bind) = lookup("CATALOG_BIND") {
            self.server.bind = parse_env("CATALOG_BIND", &bind)?;
        }
        if let Some(host) = lookup("CATALOG_HOST") {
            self.server.bind.set_ip(parse_env("CATALOG_HOST", &host)?);
        }
        if let Some(port) = lookup("CATALOG_PORT") {
            self.server.bind.set_port(parse_env("CATALOG_PORT", &port)?);
        }
        if let Some(backend) = lookup("CATALOG_STORAGE") {
            self.storage.backend = backend.parse()?;
        }
        if let Some(url) = lookup("CATALOG_DATABASE_URL") {
            self.storage.url = url;
        }
        if let Some(filter) = lookup("RUST_LOG").or_else(|| lookup("CATALOG_LOG")) {
            self.log.filter = filter;
        }
        Ok(())
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.server.bind.port() == 0 {
            return Err(ConfigError::Invalid("server port must not be 0".to_string()));
        }
        if self.storage.backend == StorageBackend::Sqlite && self.storage.url.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "storage.url is required by the sqlite backend".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_env<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Env {
        key,
        value: value.to_string(),
    })
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file")]
    Read(#[source] std::io::Error),
    #[error("malformed config file")]
    Toml(#[from] toml::de::Error),
    #[error("{key} has an unusable value {value:?}")]
    Env { key: &'static str, value: String },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
