//! Command execution context
//!
//! Resolves the server connection once per invocation so search commands
//! only deal with their own arguments.

use log::debug;

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::RegistryClient;
use crate::config::SearchConfig;
use crate::error::Result;

/// Context for search commands containing the resolved config, client and
/// output format.
pub struct SearchContext {
    /// Resolved connection settings
    pub config: SearchConfig,
    /// Search extension client
    pub client: RegistryClient,
    /// Output format preference
    pub format: OutputFormat,
}

impl SearchContext {
    /// Create a new search context from the global options.
    ///
    /// # Errors
    /// Returns error if no server URL can be resolved, the URL or
    /// credentials are malformed, or the HTTP client cannot be built.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = SearchConfig::from_options(opts)?;
        let client = RegistryClient::new(&config)?;
        debug!(
            "Search endpoint {} (verify_tls={}, auth={})",
            client.endpoint(),
            config.verify_tls,
            config.credentials.is_some()
        );

        Ok(Self {
            format: config.format,
            config,
            client,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, Error};
    use tempfile::tempdir;

    #[test]
    fn test_context_from_url_flag() {
        let opts = GlobalOptions {
            url: Some("https://registry.example.com/".to_string()),
            format: OutputFormat::Yaml,
            ..Default::default()
        };

        let ctx = SearchContext::new(&opts).unwrap();
        assert_eq!(
            ctx.client.endpoint(),
            "https://registry.example.com/v2/_zot/ext/search"
        );
        assert_eq!(ctx.format, OutputFormat::Yaml);
    }

    #[test]
    fn test_context_without_server_fails() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.yaml");
        let opts = GlobalOptions {
            config: Some(path.to_string_lossy().into_owned()),
            ..Default::default()
        };

        let err = SearchContext::new(&opts).err().unwrap();
        assert!(matches!(err, Error::Config(ConfigError::MissingUrl)));
    }
}
