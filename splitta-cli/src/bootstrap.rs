use rust_decimal::Decimal;
use splitta_domain::{Money, SplitPolicy};
use splitta_presentation::Currency;
use std::{env, path::PathBuf, str::FromStr};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_LEDGER_PATH: &str = "splitta.json";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a decimal amount of at least 0.005 (got '{value}')")]
    InvalidTolerance { name: &'static str, value: String },
    #[error("{name} must be 'exact' or 'cents' (got '{value}')")]
    UnknownSplitPolicy { name: &'static str, value: String },
}

/// Settings resolved from the environment (and a `.env` file when present).
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub ledger_path: PathBuf,
    pub currency: Currency,
    pub epsilon: Money,
    pub split_policy: SplitPolicy,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Currency::default();
        let currency = Currency::new(
            lookup("SPLITTA_CURRENCY_CODE").unwrap_or(defaults.code),
            lookup("SPLITTA_CURRENCY_SYMBOL").unwrap_or(defaults.symbol),
        );

        let epsilon = match lookup("SPLITTA_EPSILON") {
            Some(raw) => parse_tolerance("SPLITTA_EPSILON", &raw)?,
            None => Money::MINOR_UNIT,
        };

        let split_policy = match lookup("SPLITTA_SPLIT_POLICY") {
            Some(raw) => parse_split_policy("SPLITTA_SPLIT_POLICY", &raw)?,
            None => SplitPolicy::default(),
        };

        Ok(Self {
            ledger_path: lookup("SPLITTA_LEDGER")
                .map_or_else(|| PathBuf::from(DEFAULT_LEDGER_PATH), PathBuf::from),
            currency,
            epsilon,
            split_policy,
        })
    }
}

/// Tolerances below half a cent would let a suggestion round to a zero payment.
pub fn parse_tolerance(name: &'static str, raw: &str) -> Result<Money, ConfigError> {
    let half_cent = Money::MINOR_UNIT.as_decimal() / Decimal::TWO;
    Decimal::from_str(raw.trim())
        .ok()
        .filter(|value| *value >= half_cent)
        .map(Money::from_decimal)
        .ok_or_else(|| ConfigError::InvalidTolerance {
            name,
            value: raw.to_string(),
        })
}

pub fn parse_split_policy(name: &'static str, raw: &str) -> Result<SplitPolicy, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "exact" => Ok(SplitPolicy::Exact),
        "cents" => Ok(SplitPolicy::cents()),
        _ => Err(ConfigError::UnknownSplitPolicy {
            name,
            value: raw.to_string(),
        }),
    }
}

/// Logs go to stderr so report output on stdout stays clean. `RUST_LOG` overrides the `warn` default.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.ledger_path, PathBuf::from("splitta.json"));
        assert_eq!(config.currency, Currency::new("INR", "₹"));
        assert_eq!(config.epsilon, Money::new(1, 2));
        assert_eq!(config.split_policy, SplitPolicy::Exact);
    }

    #[test]
    fn every_variable_is_read() {
        let config = config_from(&[
            ("SPLITTA_LEDGER", "/tmp/flat.json"),
            ("SPLITTA_CURRENCY_CODE", "EUR"),
            ("SPLITTA_CURRENCY_SYMBOL", "€"),
            ("SPLITTA_EPSILON", "0.005"),
            ("SPLITTA_SPLIT_POLICY", "Cents"),
        ])
        .unwrap();

        assert_eq!(config.ledger_path, PathBuf::from("/tmp/flat.json"));
        assert_eq!(config.currency, Currency::new("EUR", "€"));
        assert_eq!(config.epsilon, Money::new(5, 3));
        assert_eq!(config.split_policy, SplitPolicy::cents());
    }

    #[rstest]
    #[case::not_a_number("abc")]
    #[case::negative("-0.01")]
    #[case::zero("0")]
    #[case::below_half_cent("0.001")]
    fn rejects_bad_tolerance(#[case] raw: &str) {
        assert_eq!(
            config_from(&[("SPLITTA_EPSILON", raw)]),
            Err(ConfigError::InvalidTolerance {
                name: "SPLITTA_EPSILON",
                value: raw.to_string(),
            })
        );
    }

    #[test]
    fn rejects_unknown_policy() {
        assert!(matches!(
            config_from(&[("SPLITTA_SPLIT_POLICY", "round")]),
            Err(ConfigError::UnknownSplitPolicy { .. })
        ));
    }
}
