use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Language whose dataset defines the tree when nothing else is configured
pub const DEFAULT_KEY_LANGUAGE: &str = "en-US";

/// Which datasets to load and where to find them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxonomyConfig {
    /// Language that defines the structural tree
    pub key_language: String,
    /// Extra languages whose catalogs are loaded up front
    pub languages: Vec<String>,
    /// Directory with `taxonomy-with-ids.<lang>.txt` files; the bundled data is used when unset
    pub data_dir: Option<PathBuf>,
}

impl Default for TaxonomyConfig {
    fn default() -> Self {
        Self {
            key_language: DEFAULT_KEY_LANGUAGE.to_string(),
            languages: Vec::new(),
            data_dir: None,
        }
    }
}

/// Load a taxonomy config from a JSON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<TaxonomyConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: TaxonomyConfig = serde_json::from_str(&contents)?;
    Ok(config)
}

/// Save a taxonomy config to a JSON file with pretty printing
pub fn save_config<P: AsRef<Path>>(config: &TaxonomyConfig, path: P) -> Result<(), ConfigError> {
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)?;
    Ok(())
}
