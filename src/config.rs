use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{BumpError, Result};

/// Represents the complete configuration for bump-version.
///
/// Every field has a default, so an empty file is a valid configuration.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub classifier: ClassifierConfig,

    #[serde(default)]
    pub ci: CiConfig,
}

/// Returns the default list of breaking change markers.
fn default_breaking_change_markers() -> Vec<String> {
    vec!["BREAKING CHANGE:".to_string()]
}

/// Returns the default commit types that trigger minor bumps.
fn default_minor_types() -> Vec<String> {
    vec!["feat".to_string()]
}

/// Returns the default commit types that trigger patch bumps.
fn default_patch_types() -> Vec<String> {
    vec!["fix".to_string()]
}

/// Rules used to classify commit messages.
///
/// A breaking-change marker anywhere in the messages means major. Otherwise a
/// line starting with one of `minor_types` (optionally scoped, then a colon)
/// means minor, and the same for `patch_types` means patch.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ClassifierConfig {
    #[serde(default = "default_breaking_change_markers")]
    pub breaking_change_markers: Vec<String>,

    #[serde(default = "default_minor_types")]
    pub minor_types: Vec<String>,

    #[serde(default = "default_patch_types")]
    pub patch_types: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig {
            breaking_change_markers: default_breaking_change_markers(),
            minor_types: default_minor_types(),
            patch_types: default_patch_types(),
        }
    }
}

fn default_output_env() -> String {
    "GITHUB_OUTPUT".to_string()
}

/// CI integration settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CiConfig {
    /// Environment variable naming the append-only output file
    #[serde(default = "default_output_env")]
    pub output_env: String,
}

impl Default for CiConfig {
    fn default() -> Self {
        CiConfig {
            output_env: default_output_env(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `bumpversion.toml` in current directory
/// 3. `.bumpversion.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let path = if let Some(path) = config_path {
        Path::new(path).to_path_buf()
    } else if Path::new("./bumpversion.toml").exists() {
        Path::new("./bumpversion.toml").to_path_buf()
    } else if let Some(config_dir) = dirs::config_dir() {
        let user_path = config_dir.join(".bumpversion.toml");
        if user_path.exists() {
            user_path
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    tracing::debug!(path = %path.display(), "loading configuration");
    let config_str = fs::read_to_string(&path)
        .map_err(|e| BumpError::config(format!("Cannot read {}: {}", path.display(), e)))?;

    toml::from_str(&config_str)
        .map_err(|e| BumpError::config(format!("Cannot parse {}: {}", path.display(), e)))
}
