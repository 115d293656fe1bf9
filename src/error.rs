use std::path::PathBuf;

use thiserror::Error;

/// Errors from the one-shot song list request.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid endpoint: {0}")]
    Url(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server answered with status {status}")]
    Status { status: u16 },

    #[error("malformed song list: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Contract violations found while composing a view. These are reported,
/// never fatal: the view still renders.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error("{component}: required prop `{prop}` is missing")]
    MissingProp {
        component: &'static str,
        prop: &'static str,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid endpoint '{endpoint}': {source}")]
    Endpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },
}
