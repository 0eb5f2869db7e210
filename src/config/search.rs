//! Per-invocation search configuration
//!
//! Resolves the server URL, credentials and TLS settings from global flags
//! and the config file.

use std::fmt;

use log::debug;
use reqwest::Url;

use super::Config;
use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::error::{ConfigError, Result};

/// Basic-auth credentials
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Parse `user:password`. The password may itself contain `:`.
    pub fn parse(value: &str) -> Result<Self> {
        match value.split_once(':') {
            Some((username, password)) if !username.is_empty() => Ok(Self {
                username: username.to_string(),
                password: password.to_string(),
            }),
            _ => Err(ConfigError::InvalidUser.into()),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Connection settings for one command invocation
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Server base URL without trailing slash
    pub base_url: String,
    pub credentials: Option<Credentials>,
    pub verify_tls: bool,
    pub format: OutputFormat,
}

impl SearchConfig {
    /// Build the configuration from global options.
    ///
    /// `--url` wins over any named server. Otherwise the server named by
    /// `--server`, or the config file's active server, is used.
    pub fn from_options(opts: &GlobalOptions) -> Result<Self> {
        let (url, stored_user, verify_tls) = match &opts.url {
            Some(url) => (url.clone(), None, true),
            None => {
                // A missing file only matters when a server was named explicitly
                let config = match opts.server_ref() {
                    Some(_) => Config::load_at(opts.config_ref())?,
                    None => Config::load_or_default(opts.config_ref())?,
                };
                let (name, entry) = config
                    .selected(opts.server_ref())?
                    .ok_or(ConfigError::MissingUrl)?;
                debug!("Using configured server '{}' ({})", name, entry.url);
                (entry.url.clone(), entry.user.clone(), entry.verify_tls)
            }
        };

        let credentials = opts
            .user
            .as_deref()
            .or(stored_user.as_deref())
            .map(Credentials::parse)
            .transpose()?;

        Ok(Self {
            base_url: normalize_url(&url)?,
            credentials,
            verify_tls: verify_tls && !opts.insecure,
            format: opts.format,
        })
    }
}

/// Check that `url` is an absolute http(s) URL and drop any trailing slash.
pub fn normalize_url(url: &str) -> Result<String> {
    let parsed = Url::parse(url).map_err(|_| ConfigError::InvalidUrl(url.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(url.to_string()).into());
    }
    Ok(parsed.as_str().trim_end_matches('/').to_string())
}
