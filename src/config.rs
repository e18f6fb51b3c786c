//! YAML Configuration File Support for the recommendation engines
//!
//! Loads the tunables shared by both engines and the popular-items fallback
//! from a single YAML file.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "village-food"
//!
//! recommender:
//!   default_top_n: 5
//!
//! matcher:
//!   default_top_n: 5
//!
//! fallback:
//!   popular_items:
//!     - item_id: "samosa"
//!       score: 10
//!     - item_id: "chai"
//!       score: 9
//!     - item_id: "dosa"
//!       score: 8
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration for the engines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RecoConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    /// Co-occurrence recommender configuration
    #[serde(default)]
    pub recommender: RecommenderYamlConfig,

    /// Feature matcher configuration
    #[serde(default)]
    pub matcher: MatcherYamlConfig,

    /// Static fallback served when a caller has no history
    #[serde(default)]
    pub fallback: FallbackYamlConfig,
}

impl RecoConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: RecoConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.recommender.validate()?;
        self.matcher.validate()?;
        self.fallback.validate()?;

        Ok(())
    }
}

impl Default for RecoConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            recommender: RecommenderYamlConfig::default(),
            matcher: MatcherYamlConfig::default(),
            fallback: FallbackYamlConfig::default(),
        }
    }
}

/// Co-occurrence recommender YAML configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommenderYamlConfig {
    /// Result count used when a caller does not ask for one.
    #[serde(default = "default_top_n")]
    pub default_top_n: usize,
}

impl RecommenderYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.default_top_n == 0 {
            return Err(ConfigLoadError::Validation(
                "recommender.default_top_n must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for RecommenderYamlConfig {
    fn default() -> Self {
        Self {
            default_top_n: default_top_n(),
        }
    }
}

/// Feature matcher YAML configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatcherYamlConfig {
    #[serde(default = "default_top_n")]
    pub default_top_n: usize,
}

impl MatcherYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.default_top_n == 0 {
            return Err(ConfigLoadError::Validation(
                "matcher.default_top_n must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for MatcherYamlConfig {
    fn default() -> Self {
        Self {
            default_top_n: default_top_n(),
        }
    }
}

/// A statically ranked item served as the empty-history fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopularItem {
    pub item_id: String,
    pub score: u64,
}

/// Popular-items fallback YAML configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackYamlConfig {
    #[serde(default = "default_popular_items")]
    pub popular_items: Vec<PopularItem>,
}

impl FallbackYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self
            .popular_items
            .iter()
            .any(|item| item.item_id.trim().is_empty())
        {
            return Err(ConfigLoadError::Validation(
                "fallback.popular_items entries must have a non-empty item_id".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for FallbackYamlConfig {
    fn default() -> Self {
        Self {
            popular_items: default_popular_items(),
        }
    }
}

fn default_top_n() -> usize {
    5
}
fn default_popular_items() -> Vec<PopularItem> {
    [("samosa", 10), ("chai", 9), ("dosa", 8)]
        .into_iter()
        .map(|(item_id, score)| PopularItem {
            item_id: item_id.to_string(),
            score,
        })
        .collect()
}
