use std::{path::Path, path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};

/// Configuration for loading books and answering queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Base URL of the index API that supplies parasha boundaries.
    ///
    /// The book name is appended as the last path segment.
    api_base: String,

    /// Request timeout for the index API, in seconds.
    timeout_secs: u64,

    /// Directory of cached `<Book>.json` index documents.
    ///
    /// When set, metadata is read from here instead of the network.
    pub metadata_dir: Option<PathBuf>,

    /// Whether queries count servant marks unless told otherwise.
    pub include_servants: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            timeout_secs: default_timeout_secs(),
            metadata_dir: None,
            include_servants: true,
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// A file with no content gives the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Returns the base URL of the index API, without a trailing slash.
    #[must_use]
    pub fn api_base(&self) -> &str {
        self.api_base.trim_end_matches('/')
    }

    /// Returns the request timeout for the index API.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Sets the base URL of the index API.
    pub fn set_api_base(&mut self, api_base: impl Into<String>) {
        self.api_base = api_base.into();
    }
}

fn default_api_base() -> String {
    "https://www.sefaria.org/api/v2/raw/index".to_string()
}

const fn default_timeout_secs() -> u64 {
    5
}

const fn default_include_servants() -> bool {
    true
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_api_base")]
        api_base: String,

        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        metadata_dir: Option<PathBuf>,

        #[serde(default = "default_include_servants")]
        include_servants: bool,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                api_base,
                timeout_secs,
                metadata_dir,
                include_servants,
            } => Self {
                api_base,
                timeout_secs,
                metadata_dir,
                include_servants,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            api_base: config.api_base,
            timeout_secs: config.timeout_secs,
            metadata_dir: config.metadata_dir,
            include_servants: config.include_servants,
        }
    }
}
