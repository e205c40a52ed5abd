// ABOUTME: Configuration file loading, validation, and hierarchical merging for cloudsearch
// ABOUTME: Supports TOML config files with XDG Base Directory specification compliance

use crate::constants::{config as config_paths, env as env_vars, formats};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub items_file: Option<String>,
    #[serde(default, deserialize_with = "validate_format")]
    pub preferred_format: Option<String>,
    #[serde(default)]
    pub default_limit: Option<usize>,
    #[serde(default)]
    pub aliases: Option<ConfigAliases>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConfigAliases {
    #[serde(flatten)]
    pub commands: HashMap<String, Vec<String>>,
}

impl Config {
    /// Load configuration from standard XDG-compliant locations
    pub fn load() -> Result<Self> {
        let mut paths = Self::get_config_paths();
        // Lowest precedence first so that later files override earlier ones
        paths.reverse();
        Self::load_from_paths(&paths.iter().map(|p| p.as_str()).collect::<Vec<_>>())
    }

    /// Load configuration from specific file paths; later paths override earlier ones.
    /// Paths that do not exist are skipped.
    pub fn load_from_paths(paths: &[&str]) -> Result<Self> {
        let mut config = Config::default();

        for path in paths {
            if !Path::new(path).is_file() {
                continue;
            }
            log::debug!("Loading config from {}", path);
            config = config.merge(Self::load_from_file(path)?);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a single file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content).with_context(|| {
            format!(
                "Failed to parse TOML config file: {}",
                path.as_ref().display()
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get standard config file paths in order of precedence (highest first)
    pub fn get_config_paths() -> Vec<String> {
        let mut paths = Vec::new();

        // 1. Project-specific config (highest precedence)
        if let Ok(current_dir) = std::env::current_dir() {
            paths.push(
                current_dir
                    .join(config_paths::PROJECT_CONFIG_FILE)
                    .to_string_lossy()
                    .to_string(),
            );
        }

        // 2. XDG config home
        if let Some(config_home) = std::env::var_os(env_vars::XDG_CONFIG_HOME) {
            let path = PathBuf::from(config_home)
                .join(config_paths::CONFIG_DIR)
                .join(config_paths::CONFIG_FILE);
            paths.push(path.to_string_lossy().to_string());
        }

        // 3. User config directory fallback
        if let Some(home_dir) = dirs::home_dir() {
            let path = home_dir
                .join(".config")
                .join(config_paths::CONFIG_DIR)
                .join(config_paths::CONFIG_FILE);
            paths.push(path.to_string_lossy().to_string());
        }

        paths
    }

    /// Merge this config with another, giving precedence to the other config
    pub fn merge(self, other: Config) -> Config {
        Config {
            items_file: other.items_file.or(self.items_file),
            preferred_format: other.preferred_format.or(self.preferred_format),
            default_limit: other.default_limit.or(self.default_limit),
            aliases: match (self.aliases, other.aliases) {
                (Some(base), Some(other)) => Some(base.merge(other)),
                (Some(base), None) => Some(base),
                (None, Some(other)) => Some(other),
                (None, None) => None,
            },
        }
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(ref aliases) = self.aliases {
            aliases.validate().context("Invalid alias configuration")?;
        }

        Ok(())
    }
}

impl ConfigAliases {
    /// Merge aliases, combining command maps
    pub fn merge(mut self, other: ConfigAliases) -> ConfigAliases {
        self.commands.extend(other.commands);
        self
    }

    /// Validate alias configuration
    pub fn validate(&self) -> Result<()> {
        for (alias_name, command_args) in &self.commands {
            if command_args.is_empty() {
                return Err(anyhow!("Alias '{}' expands to nothing", alias_name));
            }
            if command_args.first() == Some(alias_name) {
                return Err(anyhow!("Recursive alias detected: {}", alias_name));
            }
        }

        // Indirect cycles are caught at expansion time by AliasExpander
        Ok(())
    }

    /// Expand an alias into its component arguments
    pub fn expand(&self, alias: &str) -> Option<&Vec<String>> {
        self.commands.get(alias)
    }
}

// Custom deserializer for format validation
fn validate_format<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value: Option<String> = Option::deserialize(deserializer)?;

    match value {
        Some(ref format) if !formats::ALL_FORMATS.contains(&format.as_str()) => {
            Err(D::Error::custom(format!(
                "Invalid format '{}'. Must be one of: {}",
                format,
                formats::ALL_FORMATS.join(", ")
            )))
        }
        other => Ok(other),
    }
}
