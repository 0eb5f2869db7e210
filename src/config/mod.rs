//! Configuration management for cvectl
//!
//! The config file holds named registry servers and which one is active:
//!
//! ```yaml
//! active_server: local
//! servers:
//!   local:
//!     url: http://localhost:5000
//!     verify_tls: true
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

mod search;

pub use search::{Credentials, SearchConfig, normalize_url};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server used when no `--server` or `--url` is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_server: Option<String>,

    /// Named registry servers
    #[serde(default)]
    pub servers: BTreeMap<String, ServerEntry>,
}

/// A registry server entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerEntry {
    /// Registry base URL
    pub url: String,

    /// Basic-auth credentials as `user:password`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// Verify TLS certificates
    #[serde(default = "default_verify_tls")]
    pub verify_tls: bool,
}

fn default_verify_tls() -> bool {
    true
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".cvectl").join("config.yaml"))
    }

    /// Resolve an optional override to a concrete path
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from an optional override path
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        Self::load_from(Self::resolve_path(path)?)
    }

    /// Load configuration, treating a missing file as empty
    pub fn load_or_default(path: Option<&str>) -> Result<Self> {
        match Self::load_at(path) {
            Err(crate::error::Error::Config(ConfigError::NotFound)) => Ok(Self::default()),
            other => other,
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Save configuration to an optional override path
    pub fn save_at(&self, path: Option<&str>) -> Result<()> {
        self.save_to(Self::resolve_path(path)?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(&path, contents)?;

        // Credentials may be stored here
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    /// Look up a server by name
    pub fn server(&self, name: &str) -> Result<&ServerEntry> {
        self.servers
            .get(name)
            .ok_or_else(|| ConfigError::ServerNotFound(name.to_string()).into())
    }

    /// The server selected by `name`, or the active one when `name` is None.
    ///
    /// Returns `Ok(None)` when nothing is selected and no server is active.
    pub fn selected(&self, name: Option<&str>) -> Result<Option<(&str, &ServerEntry)>> {
        let Some(name) = name.or(self.active_server.as_deref()) else {
            return Ok(None);
        };
        let (key, entry) = self
            .servers
            .get_key_value(name)
            .ok_or_else(|| ConfigError::ServerNotFound(name.to_string()))?;
        Ok(Some((key.as_str(), entry)))
    }

    /// Insert or replace a server. The first server added becomes active.
    pub fn add_server(&mut self, name: &str, entry: ServerEntry) {
        self.servers.insert(name.to_string(), entry);
        if self.servers.len() == 1 {
            self.active_server = Some(name.to_string());
        }
    }

    /// Make `name` the active server
    pub fn set_active_server(&mut self, name: &str) -> Result<()> {
        self.server(name)?;
        self.active_server = Some(name.to_string());
        Ok(())
    }

    /// Remove a server, clearing the active selection if it pointed there
    pub fn remove_server(&mut self, name: &str) -> Result<ServerEntry> {
        let entry = self
            .servers
            .remove(name)
            .ok_or_else(|| ConfigError::ServerNotFound(name.to_string()))?;
        if self.active_server.as_deref() == Some(name) {
            self.active_server = None;
        }
        Ok(entry)
    }
}
