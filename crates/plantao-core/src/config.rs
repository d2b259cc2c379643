//! Board configuration with environment overrides.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::MAX_RATING;

pub const DEFAULT_MIN_RATING: f64 = 4.0;
pub const DEFAULT_PROGRESS_STEP: u8 = 5;
pub const DEFAULT_TICK_INTERVAL_SECS: u64 = 2;

/// Configuration errors.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{var} has an unparsable value: {value}")]
    Unparsable { var: String, value: String },

    #[error("invalid configuration: {0}")]
    OutOfRange(String),
}

/// Tunables for ranking and the progress timer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BoardConfig {
    /// Candidates rated below this are hidden
    pub min_rating: f64,
    /// Progress added to each active slot per tick
    pub progress_step: u8,
    /// How often the host should call `tick`
    pub tick_interval_secs: u64,
    /// Database file; in-memory when absent
    pub db_path: Option<String>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            min_rating: DEFAULT_MIN_RATING,
            progress_step: DEFAULT_PROGRESS_STEP,
            tick_interval_secs: DEFAULT_TICK_INTERVAL_SECS,
            db_path: None,
        }
    }
}

impl BoardConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `PLANTAO_MIN_RATING`: default 4.0
    /// - `PLANTAO_PROGRESS_STEP`: default 5
    /// - `PLANTAO_TICK_INTERVAL_SECS`: default 2
    /// - `PLANTAO_DB_PATH`: in-memory when unset
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from any key lookup (env, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            min_rating: parse_var(&lookup, "PLANTAO_MIN_RATING", defaults.min_rating)?,
            progress_step: parse_var(&lookup, "PLANTAO_PROGRESS_STEP", defaults.progress_step)?,
            tick_interval_secs: parse_var(
                &lookup,
                "PLANTAO_TICK_INTERVAL_SECS",
                defaults.tick_interval_secs,
            )?,
            db_path: lookup("PLANTAO_DB_PATH").filter(|p| !p.trim().is_empty()),
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse config from a JSON document; missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|e| ConfigError::Unparsable {
            var: "config".into(),
            value: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=MAX_RATING).contains(&self.min_rating) {
            return Err(ConfigError::OutOfRange(format!(
                "min_rating must be between 0 and {}, got {}",
                MAX_RATING, self.min_rating
            )));
        }
        if !(1..=100).contains(&self.progress_step) {
            return Err(ConfigError::OutOfRange(format!(
                "progress_step must be between 1 and 100, got {}",
                self.progress_step
            )));
        }
        if self.tick_interval_secs == 0 {
            return Err(ConfigError::OutOfRange(
                "tick_interval_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse::<T>().map_err(|_| ConfigError::Unparsable {
            var: key.to_string(),
            value: raw,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = BoardConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, BoardConfig::default());
        assert_eq!(config.min_rating, 4.0);
        assert_eq!(config.tick_interval_secs, 2);
    }

    #[test]
    fn test_overrides() {
        let config = BoardConfig::from_lookup(lookup_from(&[
            ("PLANTAO_MIN_RATING", "3.5"),
            ("PLANTAO_PROGRESS_STEP", " 10 "),
            ("PLANTAO_DB_PATH", "/var/lib/plantao.db"),
        ]))
        .unwrap();

        assert_eq!(config.min_rating, 3.5);
        assert_eq!(config.progress_step, 10);
        assert_eq!(config.db_path, Some("/var/lib/plantao.db".into()));
    }

    #[test]
    fn test_unparsable_value() {
        let err = BoardConfig::from_lookup(lookup_from(&[("PLANTAO_PROGRESS_STEP", "fast")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Unparsable {
                var: "PLANTAO_PROGRESS_STEP".into(),
                value: "fast".into()
            }
        );
    }

    #[test]
    fn test_out_of_range() {
        assert!(matches!(
            BoardConfig::from_lookup(lookup_from(&[("PLANTAO_MIN_RATING", "6")])),
            Err(ConfigError::OutOfRange(_))
        ));
        assert!(matches!(
            BoardConfig::from_lookup(lookup_from(&[("PLANTAO_PROGRESS_STEP", "0")])),
            Err(ConfigError::OutOfRange(_))
        ));
        // u8 overflow is a parse failure
        assert!(matches!(
            BoardConfig::from_lookup(lookup_from(&[("PLANTAO_PROGRESS_STEP", "300")])),
            Err(ConfigError::Unparsable { .. })
        ));
    }

    #[test]
    fn test_from_json_partial() {
        let config = BoardConfig::from_json(r#"{ "min_rating": 4.5 }"#).unwrap();
        assert_eq!(config.min_rating, 4.5);
        assert_eq!(config.progress_step, DEFAULT_PROGRESS_STEP);

        assert!(BoardConfig::from_json("{ not json").is_err());
    }
}
