//! Calculator configuration
//!
//! Display precision, the epsilons that bias guided-input suggestions
//! toward the safe side of the GCR, the liquidation-price warning band and
//! the price feeds quoted as the inverse pair.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::risk::DISPLAY_DP;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Display precision {0} exceeds 28 decimal places")]
    DisplayPrecision(u32),

    #[error("{field} must be at least half a display unit ({minimum}), got {value}")]
    UnsafeEpsilon {
        field: &'static str,
        minimum: Decimal,
        value: Decimal,
    },

    #[error("Liquidation warning threshold must be in [0, 1), got {0}")]
    WarningThreshold(Decimal),
}

/// Position manager calculator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Decimal places shown for ratios, prices and suggestions
    pub display_dp: u32,
    /// Subtracted from the max-tokens suggestion before rounding
    pub token_epsilon: Decimal,
    /// Added to the min-collateral suggestion before rounding
    pub collateral_epsilon: Decimal,
    /// Warn when the liquidation price is more than this fraction under
    /// the latest price
    pub liquidation_warning_threshold: Decimal,
    /// Synthetic symbol prefixes whose price feed quotes the inverse pair
    pub inverted_feed_prefixes: Vec<String>,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            display_dp: DISPLAY_DP,
            token_epsilon: Decimal::new(1, 4),      // 0.0001
            collateral_epsilon: Decimal::new(5, 5), // 0.00005
            liquidation_warning_threshold: Decimal::new(2, 1), // 0.2
            inverted_feed_prefixes: vec!["yUSD".to_string()],
        }
    }
}

impl CalculatorConfig {
    /// Load from JSON; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the epsilons keep suggestions on the safe side.
    ///
    /// Rounding to `display_dp` moves a value by at most half a display
    /// unit, so each epsilon must be at least that large.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.display_dp > 27 {
            return Err(ConfigError::DisplayPrecision(self.display_dp));
        }

        let half_unit = Decimal::new(5, self.display_dp + 1);
        for (field, value) in [
            ("token_epsilon", self.token_epsilon),
            ("collateral_epsilon", self.collateral_epsilon),
        ] {
            if value < half_unit {
                return Err(ConfigError::UnsafeEpsilon {
                    field,
                    minimum: half_unit,
                    value,
                });
            }
        }

        if self.liquidation_warning_threshold < Decimal::ZERO
            || self.liquidation_warning_threshold >= Decimal::ONE
        {
            return Err(ConfigError::WarningThreshold(self.liquidation_warning_threshold));
        }

        Ok(())
    }

    /// Check if the synthetic token's price feed quotes the inverse pair
    pub fn is_price_feed_inverted(&self, token_symbol: &str) -> bool {
        self.inverted_feed_prefixes
            .iter()
            .any(|prefix| token_symbol.starts_with(prefix.as_str()))
    }
}
