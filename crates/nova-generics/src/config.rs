use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Defaults applied by [`crate::GenericsAnalyzer`].
///
/// ```toml
/// ignored_types = ["java.io.Serializable"]
/// marker_interfaces = ["GroovyObject"]
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenericsConfig {
    /// Binary names of supertypes excluded from every analysis.
    #[serde(default)]
    pub ignored_types: Vec<String>,

    /// Simple names of non-generic interfaces that are walked through but never recorded.
    #[serde(default = "default_marker_interfaces")]
    pub marker_interfaces: Vec<String>,
}

fn default_marker_interfaces() -> Vec<String> {
    vec!["GroovyObject".to_string()]
}

impl Default for GenericsConfig {
    fn default() -> Self {
        Self {
            ignored_types: Vec::new(),
            marker_interfaces: default_marker_interfaces(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse toml config: {0}")]
    Toml(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        // The default `Display` embeds a source snippet; keep only the message.
        ConfigError::Toml(err.message().to_string())
    }
}

impl GenericsConfig {
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::load_from_str(&text)
    }

    pub fn load_from_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}
