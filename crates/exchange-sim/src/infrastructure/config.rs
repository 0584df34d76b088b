use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rex_core::{DATASET_OWNER, Quantity};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {error}")]
    Io {
        path: String,
        #[source]
        error: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("User name must not be empty")]
    EmptyUser,
    #[error("User name '{0}' is reserved for dataset records")]
    ReservedUser(String),
    #[error("Initial balance for {currency} is negative: {amount}")]
    NegativeBalance { currency: String, amount: Quantity },
}

/// Settings for one simulator session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Order record file loaded at start-up
    #[serde(default = "default_dataset")]
    pub dataset: PathBuf,

    /// Owner name given to orders entered through the driver
    #[serde(default = "default_user")]
    pub user: String,

    /// Name passed to `create_matching_algorithm`
    #[serde(default = "default_matching_algorithm")]
    pub matching_algorithm: String,

    /// Starting wallet contents
    #[serde(default = "default_balances")]
    pub initial_balances: BTreeMap<String, Decimal>,
}

fn default_dataset() -> PathBuf {
    PathBuf::from("DataSets/OrderBook_Example.csv")
}

fn default_user() -> String {
    "simuser".to_string()
}

fn default_matching_algorithm() -> String {
    "book-order".to_string()
}

fn default_balances() -> BTreeMap<String, Decimal> {
    BTreeMap::from([("BTC".to_string(), Decimal::TEN)])
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            dataset: default_dataset(),
            user: default_user(),
            matching_algorithm: default_matching_algorithm(),
            initial_balances: default_balances(),
        }
    }
}

impl SimulatorConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
            path: path.display().to_string(),
            error,
        })?;
        Self::from_json(&content)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimulatorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the embedded default configuration
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::from_json(include_str!("default_config.json"))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.user.trim().is_empty() {
            return Err(ConfigError::EmptyUser);
        }
        if self.user == DATASET_OWNER {
            return Err(ConfigError::ReservedUser(self.user.clone()));
        }
        if let Some((currency, amount)) = self
            .initial_balances
            .iter()
            .find(|(_, amount)| **amount < Decimal::ZERO)
        {
            return Err(ConfigError::NegativeBalance {
                currency: currency.clone(),
                amount: *amount,
            });
        }
        Ok(())
    }
}
