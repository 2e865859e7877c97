use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SemverTagError};
use crate::tagging::Tagger;

/// Name of the per-repository configuration file
pub const CONFIG_FILE_NAME: &str = "semver-tag.toml";

/// Represents the complete configuration for git-semver-tag.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub tagger: TaggerConfig,

    #[serde(default)]
    pub version: VersionConfig,
}

fn default_tagger_name() -> String {
    "semver-tag".to_string()
}

fn default_tagger_email() -> String {
    "semver-tag@localhost".to_string()
}

fn default_version_file() -> String {
    "VERSION".to_string()
}

/// Identity recorded on created tags.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TaggerConfig {
    #[serde(default = "default_tagger_name")]
    pub name: String,

    #[serde(default = "default_tagger_email")]
    pub email: String,
}

impl Default for TaggerConfig {
    fn default() -> Self {
        TaggerConfig {
            name: default_tagger_name(),
            email: default_tagger_email(),
        }
    }
}

impl From<&TaggerConfig> for Tagger {
    fn from(config: &TaggerConfig) -> Self {
        Tagger::new(&config.name, &config.email)
    }
}

/// Where the declared version is read from.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct VersionConfig {
    /// Version file, relative to the working tree root unless absolute
    #[serde(default = "default_version_file")]
    pub file: String,
}

impl Default for VersionConfig {
    fn default() -> Self {
        VersionConfig {
            file: default_version_file(),
        }
    }
}

impl VersionConfig {
    /// Resolve the version file against a working tree root
    pub fn file_in(&self, root: &Path) -> PathBuf {
        root.join(&self.file)
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `semver-tag.toml` in the current directory
/// 3. `.semver-tag.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let path = if let Some(path) = config_path {
        PathBuf::from(path)
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        PathBuf::from(CONFIG_FILE_NAME)
    } else if let Some(user_path) = dirs::config_dir()
        .map(|dir| dir.join(format!(".{}", CONFIG_FILE_NAME)))
        .filter(|path| path.exists())
    {
        user_path
    } else {
        tracing::debug!("no configuration file found, using defaults");
        return Ok(Config::default());
    };

    tracing::debug!(path = %path.display(), "loading configuration");
    let config_str = fs::read_to_string(&path).map_err(|e| {
        SemverTagError::config(format!("cannot read '{}': {}", path.display(), e))
    })?;

    toml::from_str(&config_str)
        .map_err(|e| SemverTagError::config(format!("cannot parse '{}': {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.tagger.name, "semver-tag");
        assert_eq!(config.tagger.email, "semver-tag@localhost");
        assert_eq!(config.version.file, "VERSION");
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: Config = toml::from_str("[tagger]\nname = \"CI\"\n").unwrap();
        assert_eq!(config.tagger.name, "CI");
        assert_eq!(config.tagger.email, "semver-tag@localhost");
        assert_eq!(config.version, VersionConfig::default());
    }

    #[test]
    fn test_version_file_in_root() {
        let config = VersionConfig {
            file: "meta/VERSION".to_string(),
        };
        assert_eq!(
            config.file_in(Path::new("/repo")),
            PathBuf::from("/repo/meta/VERSION")
        );
    }

    #[test]
    fn test_tagger_from_config() {
        let tagger = Tagger::from(&TaggerConfig::default());
        assert_eq!(tagger, Tagger::new("semver-tag", "semver-tag@localhost"));
    }
}
