//! Error types for the cvectl CLI

use thiserror::Error;

/// Result type alias for cvectl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Param(#[from] ParamError),

    /// The server could not confirm support for a required query.
    ///
    /// Keeps the underlying cause so "server too old" and "server
    /// unreachable" stay distinguishable.
    #[error("{source}: '{query}'")]
    Unsupported {
        query: String,
        #[source]
        source: Box<Error>,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Wrap an error raised while checking server support for `query`.
    pub fn unsupported(query: &str, source: Error) -> Self {
        Error::Unsupported {
            query: query.to_string(),
            source: Box::new(source),
        }
    }
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// Command-line argument errors, detected before any network call
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParamError {
    #[error("invalid CLI parameter: {0}")]
    InvalidCliParameter(String),

    #[error("invalid image reference '{0}', expected repo:tag or repo@digest")]
    InvalidImageRef(String),

    #[error("invalid option '{value}', supported values: [{options}]")]
    InvalidOption { value: String, options: String },
}

/// Search API errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed. Check the credentials passed with --user.")]
    Unauthorized,

    #[error("Access denied. You don't have permission to query this registry.")]
    Forbidden,

    #[error("Search extension not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("Query failed: {0}")]
    GraphQl(String),

    #[error("the server's search extension does not support the required query")]
    QueryNotSupported,
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to server".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found. Run `cvectl server add <NAME> <URL>` to create one.")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error("No server URL provided. Pass --url or run `cvectl server add <NAME> <URL>`.")]
    MissingUrl,

    #[error("Invalid server URL '{0}'")]
    InvalidUrl(String),

    #[error("Invalid --user value, expected 'user:password'")]
    InvalidUser,

    #[error("Server '{0}' not found in configuration. Run `cvectl server list` to see configured servers.")]
    ServerNotFound(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
