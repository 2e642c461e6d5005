//! Server configuration loaded from `PORTAL_*` environment variables

use chrono::NaiveTime;
use core_kernel::{BillingSettings, Timezone};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Everything the binary needs to come up: bind address, database,
/// and the billing constants the computation chain runs with
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Interface the server binds, e.g. "0.0.0.0"
    pub host: String,
    /// TCP port the server listens on
    pub port: u16,
    /// PostgreSQL connection string
    pub database_url: String,
    /// Default tracing filter when RUST_LOG is not set
    pub log_level: String,
    /// Prefix invoice numbers carry, e.g. the SP in SP/2024-25/0042
    pub invoice_prefix: String,
    /// Timezone of the billing calendar
    pub timezone: Timezone,
    /// Local time before which the current day is not counted as started
    pub day_cutoff: NaiveTime,
    /// IGST rate applied to domestic clients, as a decimal fraction
    pub igst_rate: Decimal,
}

impl Default for ApiConfig {
    fn default() -> Self {
        let billing = BillingSettings::default();
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: "postgres://localhost/studio_portal".to_string(),
            log_level: "info".to_string(),
            invoice_prefix: "SP".to_string(),
            timezone: billing.timezone,
            day_cutoff: billing.day_cutoff,
            igst_rate: billing.igst_rate,
        }
    }
}

impl ApiConfig {
    /// Reads `PORTAL_*` environment variables into a config
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("PORTAL"))
            .build()?
            .try_deserialize()
    }

    /// The host:port string the listener binds
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The billing constants injected into the computation chain
    pub fn billing_settings(&self) -> BillingSettings {
        BillingSettings {
            timezone: self.timezone,
            day_cutoff: self.day_cutoff,
            igst_rate: self.igst_rate,
        }
    }
}
