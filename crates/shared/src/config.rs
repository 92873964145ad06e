//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Billing and subscription configuration.
    #[serde(default)]
    pub billing: BillingConfig,
    /// Administrative account configuration.
    #[serde(default)]
    pub admin: AdminConfig,
}

/// Billing and subscription configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BillingConfig {
    /// Monthly base price before referral discounts, in USD.
    #[serde(default = "default_base_price")]
    pub base_price: Decimal,
    /// Length of the free trial window, in days.
    #[serde(default = "default_trial_days")]
    pub trial_days: i64,
    /// Discount percent earned per active referral.
    #[serde(default = "default_percent_per_referral")]
    pub percent_per_referral: u32,
    /// Flat extra discount percent for tenants who were themselves referred.
    /// Zero disables the bonus.
    #[serde(default)]
    pub referred_bonus: u32,
}

fn default_base_price() -> Decimal {
    Decimal::new(2999, 2) // $29.99
}

fn default_trial_days() -> i64 {
    30
}

fn default_percent_per_referral() -> u32 {
    10
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            base_price: default_base_price(),
            trial_days: default_trial_days(),
            percent_per_referral: default_percent_per_referral(),
            referred_bonus: 0,
        }
    }
}

/// Administrative account configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminConfig {
    /// Username of the designated administrative account, which bypasses
    /// access gating. None means no such account.
    #[serde(default)]
    pub username: Option<String>,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("TRESTLE").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
