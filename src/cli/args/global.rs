//! Global CLI options shared across all commands
//!
//! Collects the global flags into one struct so handlers take a single
//! parameter instead of threading each flag through.

use crate::cli::{Cli, OutputFormat};

/// Global CLI options passed to all command handlers.
///
/// # Precedence
///
/// Server selection is: `--url` flag > `CVECTL_URL` > named server
/// (`--server`, else the config file's active server). The flag/env layer is
/// captured here; the config file layer is resolved in `SearchConfig`.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output format (table, json, yaml)
    pub format: OutputFormat,

    /// Server base URL override
    pub url: Option<String>,

    /// Named server from the config file
    pub server: Option<String>,

    /// Basic-auth credentials as `user:password`
    pub user: Option<String>,

    /// Custom config file path (defaults to ~/.cvectl/config.yaml)
    pub config: Option<String>,

    /// Skip TLS certificate verification
    pub insecure: bool,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            url: cli.url.clone(),
            server: cli.server.clone(),
            user: cli.user.clone(),
            config: cli.config.clone(),
            insecure: cli.insecure,
        }
    }

    /// Get config path as `Option<&str>`.
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Get server name override as `Option<&str>`.
    pub fn server_ref(&self) -> Option<&str> {
        self.server.as_deref()
    }
}
