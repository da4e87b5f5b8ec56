use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GalleryError, Result};

/// Environment variable overriding `database_path`
pub const ENV_DATABASE_PATH: &str = "GALLERY_DATABASE_PATH";
/// Environment variable overriding `bind_addr`
pub const ENV_BIND: &str = "GALLERY_BIND";

/// Settings for the gallery server and CLI.
///
/// Resolution order: defaults, then `~/.gallery/config.toml`, then
/// environment, then command-line flags (applied by the caller).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// SQLite database file
    pub database_path: PathBuf,
    /// HTTP listen address
    pub bind_addr: SocketAddr,
    /// Upper bound on pooled database connections
    pub max_connections: u32,
    /// Allow any CORS origin instead of localhost only
    pub cors_permissive: bool,
    /// Per-request timeout
    pub request_timeout_secs: u64,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            database_path: Self::gallery_home().join("gallery.db"),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 7070)),
            max_connections: 5,
            cors_permissive: false,
            request_timeout_secs: 30,
        }
    }
}

impl GalleryConfig {
    /// Load from the default config path, falling back to defaults when no
    /// file exists, then apply environment overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        let mut config = if path.exists() {
            Self::load_from(&path)?
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Self::default()
        };

        config.apply_overrides(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a config file without consulting the environment.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| GalleryError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| GalleryError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `~/.gallery`
    pub fn gallery_home() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".gallery")
    }

    /// `~/.gallery/config.toml`
    pub fn config_path() -> PathBuf {
        Self::gallery_home().join("config.toml")
    }

    /// Apply overrides from a key lookup (the process environment in `load`).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_DATABASE_PATH) {
            self.database_path = PathBuf::from(path);
        }

        if let Some(bind) = lookup(ENV_BIND) {
            self.bind_addr = bind.parse().map_err(|_| {
                GalleryError::config(format!("{ENV_BIND} is not a socket address: '{bind}'"))
            })?;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_connections == 0 {
            return Err(GalleryError::config("max_connections must be at least 1"));
        }
        if self.request_timeout_secs == 0 {
            return Err(GalleryError::config(
                "request_timeout_secs must be at least 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults() {
        let config = GalleryConfig::default();
        assert_eq!(config.bind_addr.port(), 7070);
        assert_eq!(config.max_connections, 5);
        assert!(!config.cors_permissive);
        assert!(config.database_path.ends_with(".gallery/gallery.db"));
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "database_path = \"/tmp/paintings.db\"\nmax_connections = 2\n").unwrap();

        let config = GalleryConfig::load_from(&path).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/tmp/paintings.db"));
        assert_eq!(config.max_connections, 2);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "max_connections = \"lots\"").unwrap();

        let err = GalleryConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, GalleryError::ConfigParse { .. }));
    }

    #[test]
    fn overrides_apply() {
        let env: HashMap<&str, &str> = [
            (ENV_DATABASE_PATH, "/var/lib/gallery.db"),
            (ENV_BIND, "0.0.0.0:8080"),
        ]
        .into_iter()
        .collect();

        let mut config = GalleryConfig::default();
        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.database_path, PathBuf::from("/var/lib/gallery.db"));
        assert_eq!(config.bind_addr.port(), 8080);
    }

    #[test]
    fn bad_bind_override_rejected() {
        let mut config = GalleryConfig::default();
        let result = config.apply_overrides(|key| (key == ENV_BIND).then(|| "nowhere".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn zero_connections_invalid() {
        let config = GalleryConfig {
            max_connections: 0,
            ..GalleryConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
