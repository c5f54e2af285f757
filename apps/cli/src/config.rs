//! # CLI Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     PANIER_DATA_PATH=/tmp/cart.json                                    │
//! │     PANIER_PROMO_CODE=CCA15                                            │
//! │     PANIER_PROMO_RATE_BPS=1500                                         │
//! │     PANIER_CURRENCY_MARKER=€                                           │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, or                                                │
//! │     ~/.config/panier/panier.toml (Linux)                               │
//! │     ~/Library/Application Support/com.panier.panier/panier.toml       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     CCA15 at 15%, "199,00 €" formatting                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [storage]
//! data_path = "/home/me/.local/share/panier/panier.json"
//!
//! [promo]
//! code = "CCA15"
//! rate_bps = 1500
//!
//! [display]
//! decimal_separator = ","
//! currency_marker = "€"
//! placeholder_image = "https://via.placeholder.com/200x200?text=Produit"
//! ```

use std::path::{Path, PathBuf};

use panier_core::{
    PriceFormatter, PromoEngine, PromoRule, DEFAULT_PROMO_CODE, DEFAULT_PROMO_RATE_BPS,
    PLACEHOLDER_IMAGE_URL,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

const CONFIG_FILE_NAME: &str = "panier.toml";
const DATA_FILE_NAME: &str = "panier.json";

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    InvalidValue(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Where the cart document lives. Defaults to the platform data dir.
    #[serde(default)]
    pub data_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromoConfig {
    #[serde(default = "default_promo_code")]
    pub code: String,

    #[serde(default = "default_promo_rate")]
    pub rate_bps: u32,
}

fn default_promo_code() -> String {
    DEFAULT_PROMO_CODE.to_string()
}

fn default_promo_rate() -> u32 {
    DEFAULT_PROMO_RATE_BPS
}

impl Default for PromoConfig {
    fn default() -> Self {
        PromoConfig {
            code: default_promo_code(),
            rate_bps: default_promo_rate(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_decimal_separator")]
    pub decimal_separator: char,

    #[serde(default = "default_currency_marker")]
    pub currency_marker: String,

    #[serde(default = "default_placeholder_image")]
    pub placeholder_image: String,
}

fn default_decimal_separator() -> char {
    ','
}

fn default_currency_marker() -> String {
    "€".to_string()
}

fn default_placeholder_image() -> String {
    PLACEHOLDER_IMAGE_URL.to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            decimal_separator: default_decimal_separator(),
            currency_marker: default_currency_marker(),
            placeholder_image: default_placeholder_image(),
        }
    }
}

// =============================================================================
// Panier Config
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PanierConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub promo: PromoConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

impl PanierConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// An explicit `config_path` must exist; the platform default path is
    /// optional.
    pub fn load(config_path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match config_path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(path = %path.display(), "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    fn from_file(path: &Path) -> ConfigResult<Self> {
        info!(path = %path.display(), "Loading config from file");
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Applies `PANIER_*` overrides, reading each variable through `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("PANIER_DATA_PATH") {
            debug!(path = %path, "Overriding data path from environment");
            self.storage.data_path = Some(PathBuf::from(path));
        }

        if let Some(code) = lookup("PANIER_PROMO_CODE") {
            self.promo.code = code;
        }

        if let Some(rate) = lookup("PANIER_PROMO_RATE_BPS") {
            match rate.parse::<u32>() {
                Ok(bps) => self.promo.rate_bps = bps,
                Err(_) => warn!(value = %rate, "Ignoring non-numeric PANIER_PROMO_RATE_BPS"),
            }
        }

        if let Some(marker) = lookup("PANIER_CURRENCY_MARKER") {
            self.display.currency_marker = marker;
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.promo.code.trim().is_empty() {
            return Err(ConfigError::InvalidValue("promo.code must not be empty".into()));
        }

        if self.promo.rate_bps > 10_000 {
            return Err(ConfigError::InvalidValue(format!(
                "promo.rate_bps must be at most 10000, got {}",
                self.promo.rate_bps
            )));
        }

        if self.display.currency_marker.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "display.currency_marker must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// The cart document path: configured, else the platform data dir,
    /// else the working directory.
    pub fn data_path(&self) -> PathBuf {
        self.storage
            .data_path
            .clone()
            .or_else(|| Self::project_dirs().map(|d| d.data_dir().join(DATA_FILE_NAME)))
            .unwrap_or_else(|| PathBuf::from(DATA_FILE_NAME))
    }

    pub fn promo_engine(&self) -> PromoEngine {
        PromoEngine::new(PromoRule::new(&self.promo.code, self.promo.rate_bps))
    }

    pub fn formatter(&self) -> PriceFormatter {
        PriceFormatter::new(
            self.display.decimal_separator,
            self.display.currency_marker.clone(),
        )
    }

    fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    fn project_dirs() -> Option<directories::ProjectDirs> {
        directories::ProjectDirs::from("com", "panier", "panier")
    }
}
