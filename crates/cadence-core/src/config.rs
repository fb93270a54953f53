//! Engine configuration
//!
//! Holds the prefix mapping, the ledger filter and the clustering thresholds.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a three-layer resolution:
//! 1. An explicit path (`--config`), which must exist
//! 2. The override in the user config dir (~/.config/cadence/cadence.toml)
//! 3. Embedded defaults (compiled into binary)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cluster::ClusterConfig;
use crate::error::{Error, Result};
use crate::filter::TransactionFilter;
use crate::normalize::{PrefixMapping, PrefixRule};

/// Embedded default config (compiled into binary)
pub const DEFAULT_CONFIG: &str = include_str!("../../../config/cadence.toml");

/// Where the effective configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Embedded,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Embedded => write!(f, "built-in defaults"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub prefixes: PrefixMapping,
    pub filter: TransactionFilter,
    pub clustering: ClusterConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prefixes: PrefixMapping::from_pairs([
                ("AMAZON RETAIL", "Amazon Retail"),
                ("AMAZON MARKETPLACE", "Amazon Marketplace"),
            ]),
            filter: TransactionFilter::new()
                .min_year(Some(2019))
                .transaction_type(Some("debit"))
                .excluded_category(Some("Transfer"))
                .excluded_vendors(["Betterment", "Chase", "Citi"]),
            clustering: ClusterConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration (explicit path, then override, then embedded)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_source(path).map(|(config, _)| config)
    }

    /// Load configuration and report which layer it came from
    pub fn load_with_source(path: Option<&Path>) -> Result<(Self, ConfigSource)> {
        let (content, source) = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                (read_config(path)?, ConfigSource::File(path.to_path_buf()))
            }
            None => match default_config_path().filter(|p| p.exists()) {
                Some(default_path) => {
                    let content = read_config(&default_path)?;
                    (content, ConfigSource::File(default_path))
                }
                None => (DEFAULT_CONFIG.to_string(), ConfigSource::Embedded),
            },
        };

        debug!("Loading config from {}", source);
        Ok((Self::parse(&content)?, source))
    }

    /// Parse config from TOML content, filling gaps with defaults
    pub fn parse(content: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

        let mut config = Config::default();

        if let Some(prefixes) = raw.prefixes {
            config.prefixes = PrefixMapping::new(
                prefixes
                    .into_iter()
                    .map(|p| PrefixRule::new(p.prefix, p.label))
                    .collect(),
            );
        }

        if let Some(filter) = raw.filter {
            if let Some(year) = filter.min_year {
                config.filter.min_year = Some(year);
            }
            if let Some(kind) = filter.transaction_type {
                config.filter.transaction_type = Some(kind);
            }
            if let Some(category) = filter.excluded_category {
                config.filter.excluded_category = Some(category);
            }
            if let Some(vendors) = filter.excluded_vendors {
                config.filter.excluded_vendors = vendors;
            }
        }

        if let Some(clustering) = raw.clustering {
            if let Some(threshold) = clustering.similarity_threshold {
                if threshold > 100 {
                    return Err(Error::Config(format!(
                        "similarity_threshold must be between 0 and 100, got {}",
                        threshold
                    )));
                }
                config.clustering.similarity_threshold = threshold as u8;
            }
            if let Some(limit) = clustering.match_limit {
                if limit == 0 {
                    return Err(Error::Config("match_limit must be at least 1".into()));
                }
                config.clustering.match_limit = limit;
            }
        }

        Ok(config)
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        let raw = RawConfig {
            prefixes: Some(
                self.prefixes
                    .rules()
                    .iter()
                    .map(|rule| RawPrefix {
                        prefix: rule.prefix.clone(),
                        label: rule.label.clone(),
                    })
                    .collect(),
            ),
            filter: Some(RawFilter {
                min_year: self.filter.min_year,
                transaction_type: self.filter.transaction_type.clone(),
                excluded_category: self.filter.excluded_category.clone(),
                excluded_vendors: Some(self.filter.excluded_vendors.clone()),
            }),
            clustering: Some(RawClustering {
                similarity_threshold: Some(u32::from(self.clustering.similarity_threshold)),
                match_limit: Some(self.clustering.match_limit),
            }),
        };

        toml::to_string_pretty(&raw)
            .map_err(|e| Error::Config(format!("Failed to render config: {}", e)))
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("cadence").join("cadence.toml"))
}

fn read_config(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read config {}: {}", path.display(), e))
    })
}

/// Raw config structure for TOML parsing
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    prefixes: Option<Vec<RawPrefix>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<RawFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    clustering: Option<RawClustering>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPrefix {
    prefix: String,
    label: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    min_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    transaction_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    excluded_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    excluded_vendors: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawClustering {
    // Wider than u8 so out-of-range values get a config error, not a parse error
    #[serde(skip_serializing_if = "Option::is_none")]
    similarity_threshold: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    match_limit: Option<usize>,
}
