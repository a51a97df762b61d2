//! Configuration management for the stock analytics server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with PHS_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::{AlertThresholds, AnalysisThresholds, ForecastDefaults, StockThresholds};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Consumption pattern thresholds
    #[serde(default)]
    pub analysis: AnalysisThresholds,

    /// Days-of-stock classification bands
    #[serde(default)]
    pub stock: StockThresholds,

    /// Alert thresholds and retention
    pub alerts: AlertsConfig,

    /// Forecast parameter defaults
    #[serde(default)]
    pub forecast: ForecastDefaults,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AlertsConfig {
    /// Variability (%) above which a consumption anomaly alert fires
    pub anomaly_variability_pct: f64,

    /// Latest-period wastage (%) above which an expiring alert fires
    pub expiry_wastage_pct: f64,

    /// How long acknowledged alerts survive later recompute cycles
    pub retention_days: i64,
}

impl AlertsConfig {
    pub fn thresholds(&self) -> AlertThresholds {
        AlertThresholds {
            anomaly_variability_pct: self.anomaly_variability_pct,
            expiry_wastage_pct: self.expiry_wastage_pct,
        }
    }

    pub fn retention(&self) -> chrono::Duration {
        chrono::Duration::days(self.retention_days.max(0))
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("PHS_ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let alert_defaults = AlertThresholds::default();

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default(
                "alerts.anomaly_variability_pct",
                alert_defaults.anomaly_variability_pct,
            )?
            .set_default("alerts.expiry_wastage_pct", alert_defaults.expiry_wastage_pct)?
            .set_default("alerts.retention_days", 30)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (PHS_ prefix)
            .add_source(
                Environment::with_prefix("PHS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for Config {
    fn default() -> Self {
        let alert_defaults = AlertThresholds::default();
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            analysis: AnalysisThresholds::default(),
            stock: StockThresholds::default(),
            alerts: AlertsConfig {
                anomaly_variability_pct: alert_defaults.anomaly_variability_pct,
                expiry_wastage_pct: alert_defaults.expiry_wastage_pct,
                retention_days: 30,
            },
            forecast: ForecastDefaults::default(),
        }
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
