//! # Configuration State
//!
//! Application configuration loaded at startup.
//!
//! ## Configuration Sources (later overrides earlier)
//! 1. Defaults (this file)
//! 2. Config file (`--config` or `<config dir>/checkout.toml`)
//! 3. Environment variables (`CHECKOUT_*`)
//!
//! Configuration is read-only after startup.

use std::path::{Path, PathBuf};

use checkout_core::pricing::TotalPolicy;
use checkout_core::Money;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigState {
    /// Header shown above the product table
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Whether the order total subtracts the discount
    pub total_policy: TotalPolicy,

    /// Show "Discount: $0.00" even when no discount applies
    pub show_zero_discount: bool,

    /// Catalog provider settings
    pub catalog: CatalogSettings,
}

/// Where the catalog comes from and how hard to try.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// JSON catalog file. `None` serves the built-in demo catalog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Extra fetch attempts after the first failure (0 = no retry)
    pub max_retries: u32,

    /// Delay before the first retry (milliseconds)
    pub initial_backoff_ms: u64,

    /// Upper bound for the delay between retries (milliseconds)
    pub max_backoff_ms: u64,

    /// Simulated latency of the demo provider (milliseconds)
    pub demo_latency_ms: u64,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        CatalogSettings {
            path: None,
            max_retries: 2,
            initial_backoff_ms: 250,
            max_backoff_ms: 2_000,
            demo_latency_ms: 300,
        }
    }
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Store: "Electro World"
    /// - Currency: $
    /// - Total: undiscounted (historical behavior)
    /// - Discount line: only when a discount applies
    fn default() -> Self {
        ConfigState {
            store_name: "Electro World".to_string(),
            currency_symbol: "$".to_string(),
            total_policy: TotalPolicy::Undiscounted,
            show_zero_discount: false,
            catalog: CatalogSettings::default(),
        }
    }
}

impl ConfigState {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// An explicit `config_path` must exist. The per-user default file is
    /// optional.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound(path)),
            Some(path) => Self::read_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::read_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Self, ConfigError> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store_name.trim().is_empty() {
            return Err(ConfigError::Invalid("store_name must not be empty".into()));
        }

        if self.currency_symbol.is_empty() {
            return Err(ConfigError::Invalid(
                "currency_symbol must not be empty".into(),
            ));
        }

        if self.catalog.initial_backoff_ms == 0 {
            return Err(ConfigError::Invalid(
                "catalog.initial_backoff_ms must be greater than 0".into(),
            ));
        }

        if self.catalog.max_backoff_ms < self.catalog.initial_backoff_ms {
            return Err(ConfigError::Invalid(
                "catalog.max_backoff_ms must be at least catalog.initial_backoff_ms".into(),
            ));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `CHECKOUT_*` overrides read through `lookup`.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup("CHECKOUT_STORE_NAME") {
            self.store_name = name;
        }

        if let Some(symbol) = lookup("CHECKOUT_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        if let Some(policy) = lookup("CHECKOUT_TOTAL_POLICY") {
            match policy.parse() {
                Ok(parsed) => {
                    debug!(policy = %policy, "Overriding total policy from environment");
                    self.total_policy = parsed;
                }
                Err(e) => warn!(policy = %policy, "Ignoring CHECKOUT_TOTAL_POLICY: {}", e),
            }
        }

        if let Some(flag) = lookup("CHECKOUT_SHOW_ZERO_DISCOUNT") {
            match flag.to_lowercase().as_str() {
                "1" | "true" | "yes" => self.show_zero_discount = true,
                "0" | "false" | "no" => self.show_zero_discount = false,
                _ => warn!(value = %flag, "Unknown CHECKOUT_SHOW_ZERO_DISCOUNT value"),
            }
        }

        if let Some(retries) = lookup("CHECKOUT_MAX_RETRIES") {
            match retries.parse::<u32>() {
                Ok(n) => {
                    debug!(max_retries = n, "Overriding max retries from environment");
                    self.catalog.max_retries = n;
                }
                Err(e) => warn!(value = %retries, "Ignoring CHECKOUT_MAX_RETRIES: {}", e),
            }
        }

        if let Some(path) = lookup("CHECKOUT_CATALOG_PATH") {
            debug!(path = %path, "Overriding catalog path from environment");
            self.catalog.path = Some(PathBuf::from(path));
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "electroworld", "checkout")
            .map(|dirs| dirs.config_dir().join("checkout.toml"))
    }

    /// Formats money with the configured symbol and two decimals.
    ///
    /// ```rust
    /// use checkout_cli::state::ConfigState;
    /// use checkout_core::Money;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        format!(
            "{}{}{}.{:02}",
            if amount.is_negative() { "-" } else { "" },
            self.currency_symbol,
            amount.dollars().abs(),
            amount.cents_part()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_format_currency() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
        assert_eq!(config.format_currency(Money::from_cents(100)), "$1.00");
        assert_eq!(config.format_currency(Money::from_cents(1)), "$0.01");
        assert_eq!(config.format_currency(Money::zero()), "$0.00");
        assert_eq!(config.format_currency(Money::from_cents(-1234)), "-$12.34");
        assert_eq!(config.format_currency(Money::from_cents(110_000)), "$1100.00");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ConfigState = toml::from_str(
            r#"
            total_policy = "discounted"

            [catalog]
            max_retries = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.total_policy, TotalPolicy::Discounted);
        assert_eq!(config.catalog.max_retries, 5);
        assert_eq!(config.catalog.initial_backoff_ms, 250);
        assert_eq!(config.store_name, "Electro World");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("CHECKOUT_STORE_NAME", "Gadget Hut"),
            ("CHECKOUT_TOTAL_POLICY", "discounted"),
            ("CHECKOUT_MAX_RETRIES", "0"),
            ("CHECKOUT_CATALOG_PATH", "/tmp/products.json"),
            ("CHECKOUT_SHOW_ZERO_DISCOUNT", "yes"),
        ]
        .into_iter()
        .collect();

        let mut config = ConfigState::default();
        config.apply_overrides(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.store_name, "Gadget Hut");
        assert_eq!(config.total_policy, TotalPolicy::Discounted);
        assert_eq!(config.catalog.max_retries, 0);
        assert_eq!(
            config.catalog.path,
            Some(PathBuf::from("/tmp/products.json"))
        );
        assert!(config.show_zero_discount);
    }

    #[test]
    fn test_bad_env_values_are_ignored() {
        let mut config = ConfigState::default();
        config.apply_overrides(|k| match k {
            "CHECKOUT_TOTAL_POLICY" => Some("sometimes".to_string()),
            "CHECKOUT_MAX_RETRIES" => Some("many".to_string()),
            _ => None,
        });

        assert_eq!(config.total_policy, TotalPolicy::Undiscounted);
        assert_eq!(config.catalog.max_retries, 2);
    }

    #[test]
    fn test_validation() {
        let mut config = ConfigState::default();
        assert!(config.validate().is_ok());

        config.catalog.max_backoff_ms = 10;
        assert!(config.validate().is_err());

        config = ConfigState::default();
        config.store_name = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_explicit_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConfigState::load(Some(dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checkout.toml");
        std::fs::write(&path, "store_name = \"Gadget Hut\"\n").unwrap();

        let config = ConfigState::load(Some(path)).unwrap();
        assert_eq!(config.currency_symbol, "$");
        assert!(!config.store_name.is_empty());
    }

    #[test]
    fn test_toml_round_trip_writes_sections() {
        let toml_str = toml::to_string_pretty(&ConfigState::default()).unwrap();
        assert!(toml_str.contains("[catalog]"));
        assert!(toml_str.contains("total_policy = \"undiscounted\""));
    }
}
