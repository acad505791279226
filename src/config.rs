//! Process-level configuration.
//!
//! Loaded once at start-up (defaults, then an optional JSON file, then CLI overrides)
//! and treated as read-only afterwards.

use crate::error::{LoanError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_HISTORY_LIMIT: usize = 50;
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;

/// Income breakpoints and the modifier applied inside each bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomeThresholds {
    pub low: Decimal,
    pub medium: Decimal,
    pub high: Decimal,
    pub low_modifier: Decimal,
    pub medium_modifier: Decimal,
    pub high_modifier: Decimal,
    pub very_high_modifier: Decimal,
}

impl Default for IncomeThresholds {
    fn default() -> Self {
        Self {
            low: dec!(2000.0),
            medium: dec!(4000.0),
            high: dec!(8000.0),
            low_modifier: dec!(0.3),
            medium_modifier: dec!(0.0),
            high_modifier: dec!(-0.1),
            very_high_modifier: dec!(-0.2),
        }
    }
}

impl IncomeThresholds {
    /// Selects the modifier for a monthly income. Buckets are `[.., low)`,
    /// `[low, medium)`, `[medium, high)` and `[high, ..)`.
    pub fn modifier_for(&self, monthly_income: Decimal) -> Decimal {
        if monthly_income < self.low {
            self.low_modifier
        } else if monthly_income < self.medium {
            self.medium_modifier
        } else if monthly_income < self.high {
            self.high_modifier
        } else {
            self.very_high_modifier
        }
    }

    fn validate(&self) -> Result<()> {
        if !(self.low < self.medium && self.medium < self.high) {
            return Err(LoanError::InvalidInput(format!(
                "income breakpoints must be strictly increasing (got {} / {} / {})",
                self.low, self.medium, self.high
            )));
        }
        Ok(())
    }
}

/// Everything the rate engine needs to price an applicant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateConfig {
    pub base_rate: Decimal,
    pub income_thresholds: IncomeThresholds,
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            base_rate: dec!(1.5),
            income_thresholds: IncomeThresholds::default(),
        }
    }
}

impl RateConfig {
    pub fn validate(&self) -> Result<()> {
        self.income_thresholds.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    #[serde(flatten)]
    pub rate: RateConfig,
    pub upstream_timeout_secs: u64,
    pub history_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rate: RateConfig::default(),
            upstream_timeout_secs: DEFAULT_UPSTREAM_TIMEOUT_SECS,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl AppConfig {
    /// Reads a JSON config file. Missing fields fall back to their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let config: AppConfig = serde_json::from_slice(&bytes)
            .map_err(|e| LoanError::InvalidInput(format!("malformed config file: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_base_rate(mut self, base_rate: Option<Decimal>) -> Self {
        if let Some(rate) = base_rate {
            self.rate.base_rate = rate;
        }
        self
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    pub fn validate(&self) -> Result<()> {
        self.rate.validate()?;
        if self.upstream_timeout_secs == 0 {
            return Err(LoanError::InvalidInput(
                "upstream_timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.rate.base_rate, dec!(1.5));
        assert_eq!(config.rate.income_thresholds.high, dec!(8000));
        assert_eq!(config.history_limit, 50);
        assert_eq!(config.upstream_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"base_rate": "2.1", "income_thresholds": {{"low": 1500}}}}"#).unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.rate.base_rate, dec!(2.1));
        assert_eq!(config.rate.income_thresholds.low, dec!(1500));
        assert_eq!(config.rate.income_thresholds.medium, dec!(4000));
        assert_eq!(config.upstream_timeout_secs, 10);
    }

    #[test]
    fn test_non_increasing_breakpoints_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"income_thresholds": {{"low": 5000}}}}"#).unwrap();

        assert!(matches!(
            AppConfig::from_file(file.path()),
            Err(LoanError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_cli_override() {
        let config = AppConfig::default().with_base_rate(Some(dec!(2.0)));
        assert_eq!(config.rate.base_rate, dec!(2.0));
        let config = config.with_base_rate(None);
        assert_eq!(config.rate.base_rate, dec!(2.0));
    }
}
