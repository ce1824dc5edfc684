use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::adaptive::DEFAULT_STREAK_THRESHOLD;
use crate::block::GenerationMode;
use crate::catalog::{Catalog, OverlayCatalog};
use crate::export::OutputFormat;
use crate::logging::{LogConfig, LogFormat, LogLevel};
use crate::models::SubscriptionTier;

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application metadata
    pub metadata: ConfigMetadata,

    /// General application settings
    pub settings: AppSettings,

    /// Content catalog overrides
    #[serde(default)]
    pub catalog: CatalogSettings,

    /// Logging settings
    #[serde(default)]
    pub logging: LogConfig,
}

/// Configuration metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigMetadata {
    /// Configuration format version
    pub version: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// General application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Tier used by `access` when none is given
    pub default_tier: SubscriptionTier,

    /// Output format when none is given
    pub output_format: OutputFormat,

    /// Completion ratio a week needs to count towards the streak
    pub streak_threshold: Decimal,

    /// Generation mode for new blocks
    pub generation_mode: GenerationMode,
}

/// Catalog override settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// JSON catalog whose entries take precedence over the built-in catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let now = Utc::now();

        AppConfig {
            metadata: ConfigMetadata {
                version: "1.0".to_string(),
                created_at: now,
                updated_at: now,
            },
            settings: AppSettings::default(),
            catalog: CatalogSettings::default(),
            logging: LogConfig::default(),
        }
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            default_tier: SubscriptionTier::Starter,
            output_format: OutputFormat::Text,
            streak_threshold: DEFAULT_STREAK_THRESHOLD,
            generation_mode: GenerationMode::Full,
        }
    }
}

/// Configuration management implementation
impl AppConfig {
    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: AppConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML configuration")?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.metadata.updated_at = Utc::now();

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml_content = toml::to_string_pretty(self)
            .with_context(|| "Failed to serialize configuration to TOML")?;

        fs::write(&path, toml_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    /// Get default configuration file path
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".coachplan")
            .join("config.toml")
    }

    /// Load from `path` (or the default location), falling back to defaults when missing
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let config_path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_config_path);

        if config_path.exists() {
            Self::load_from_file(&config_path)
        } else if path.is_some() {
            bail!("Config file not found: {}", config_path.display())
        } else {
            Ok(Self::default())
        }
    }

    /// Catalog to generate with: overrides layered over the built-in catalog
    pub fn catalog(&self) -> Result<OverlayCatalog<'static>> {
        let overrides = match &self.catalog.override_path {
            Some(path) => Catalog::load_from_file(path)
                .with_context(|| format!("Failed to load catalog overrides: {}", path.display()))?,
            None => Catalog::default(),
        };
        Ok(OverlayCatalog::over_builtin(overrides))
    }

    /// All settable keys with their current values
    pub fn list_values(&self) -> Vec<(&'static str, String)> {
        Self::KEYS
            .iter()
            .filter_map(|key| self.get_value(key).map(|value| (*key, value)))
            .collect()
    }

    const KEYS: [&'static str; 8] = [
        "settings.default_tier",
        "settings.output_format",
        "settings.streak_threshold",
        "settings.generation_mode",
        "catalog.override_path",
        "logging.level",
        "logging.format",
        "logging.file_path",
    ];

    /// Current value of a dotted key
    pub fn get_value(&self, key: &str) -> Option<String> {
        let value = match key {
            "settings.default_tier" => self.settings.default_tier.to_string(),
            "settings.output_format" => self.settings.output_format.to_string(),
            "settings.streak_threshold" => self.settings.streak_threshold.to_string(),
            "settings.generation_mode" => match self.settings.generation_mode {
                GenerationMode::Full => "full".to_string(),
                GenerationMode::Progressive => "progressive".to_string(),
            },
            "catalog.override_path" => self
                .catalog
                .override_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            "logging.level" => self.logging.level.to_filter(),
            "logging.format" => format!("{:?}", self.logging.format).to_lowercase(),
            "logging.file_path" => self
                .logging
                .file_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            _ => return None,
        };
        Some(value)
    }

    /// Set a dotted key from its string form; empty values clear optional paths
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "settings.default_tier" => {
                self.settings.default_tier = SubscriptionTier::from_label(value);
            }
            "settings.output_format" => {
                self.settings.output_format = value.parse().map_err(anyhow::Error::msg)?;
            }
            "settings.streak_threshold" => {
                let threshold: Decimal = value
                    .parse()
                    .with_context(|| format!("Invalid threshold: {}", value))?;
                if threshold < Decimal::ZERO || threshold > Decimal::ONE {
                    bail!("Streak threshold must be between 0 and 1, got {}", threshold);
                }
                self.settings.streak_threshold = threshold;
            }
            "settings.generation_mode" => {
                self.settings.generation_mode = match value.to_lowercase().as_str() {
                    "full" => GenerationMode::Full,
                    "progressive" => GenerationMode::Progressive,
                    _ => bail!("Invalid generation mode: {}", value),
                };
            }
            "catalog.override_path" => {
                self.catalog.override_path = (!value.is_empty()).then(|| PathBuf::from(value));
            }
            "logging.level" => {
                self.logging.level = value.parse::<LogLevel>().map_err(anyhow::Error::msg)?;
            }
            "logging.format" => {
                self.logging.format = value.parse::<LogFormat>().map_err(anyhow::Error::msg)?;
            }
            "logging.file_path" => {
                self.logging.file_path = (!value.is_empty()).then(|| PathBuf::from(value));
            }
            _ => bail!("Unknown configuration key: {}", key),
        }
        Ok(())
    }
}
