use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use url::Url;

use crate::error::ConfigError;
use crate::friends::{INITIAL_FRIENDS, INITIAL_OWNER};
use crate::render::{MountTarget, DEFAULT_MOUNT};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000";

/// Settings for the `snapview` binary. Every field has a default, so an
/// empty or missing file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub mount: String,
    pub endpoint: String,
    pub owner_name: String,
    pub friends: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mount: DEFAULT_MOUNT.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            owner_name: INITIAL_OWNER.to_string(),
            friends: INITIAL_FRIENDS.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl Settings {
    /// Reads settings from `path`. A file that does not exist yields the
    /// defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Settings::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let settings: Settings = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: PathBuf::from(path),
            source,
        })?;
        settings.endpoint_url()?;
        Ok(settings)
    }

    pub fn mount_target(&self) -> MountTarget {
        MountTarget::new(self.mount.as_str())
    }

    pub fn endpoint_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.endpoint).map_err(|source| ConfigError::Endpoint {
            endpoint: self.endpoint.clone(),
            source,
        })
    }
}
