//! Configuration management for the Bar Costing Platform
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with BCP_ prefix

use config::{ConfigError, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Defaults offered by the event simulator
    pub simulation: SimulationDefaults,

    /// ISO currency code prices are quoted in
    pub currency: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SimulationDefaults {
    pub num_adults: u32,
    pub num_children: u32,
    pub duration_hours: Decimal,
    pub profit_margin_percent: Decimal,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("BCP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("simulation.num_adults", 40)?
            .set_default("simulation.num_children", 10)?
            .set_default("simulation.duration_hours", "4")?
            .set_default("simulation.profit_margin_percent", "100")?
            .set_default("currency", "BRL")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (BCP_ prefix)
            .add_source(
                Environment::with_prefix("BCP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for SimulationDefaults {
    fn default() -> Self {
        Self {
            num_adults: 40,
            num_children: 10,
            duration_hours: Decimal::from(4),
            profit_margin_percent: Decimal::from(100),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            simulation: SimulationDefaults::default(),
            currency: "BRL".to_string(),
        }
    }
}
