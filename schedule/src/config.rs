//! Configuration for the `showtime` binary.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::types::{EventRating, Money};
use serde::{Deserialize, Serialize};
use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Details of the event the demo schedules
    pub event: EventConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive (e.g. `info`, `showtime_schedule=debug`)
    pub filter: String,
    /// Output layout
    pub format: LogFormat,
}

/// Layout of `tracing` output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line, human oriented
    Pretty,
    /// One short line per record
    Compact,
    /// Default `fmt` layout
    #[default]
    Full,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "full" => Ok(Self::Full),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

/// Event details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventConfig {
    /// Event name
    pub name: String,
    /// Base ticket price
    pub base_price: Money,
    /// Content rating
    pub rating: EventRating,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                filter: "info".to_string(),
                format: LogFormat::default(),
            },
            event: EventConfig {
                name: "Premiere".to_string(),
                base_price: Money::from_cents(1250),
                rating: EventRating::Mid,
            },
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Missing or unparsable values fall back to [`Config::default`].
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            logging: LoggingConfig {
                filter: lookup("RUST_LOG").unwrap_or(defaults.logging.filter),
                format: lookup("LOG_FORMAT")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.logging.format),
            },
            event: EventConfig {
                name: lookup("SHOWTIME_EVENT_NAME").unwrap_or(defaults.event.name),
                base_price: lookup("SHOWTIME_BASE_PRICE")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.event.base_price),
                rating: lookup("SHOWTIME_RATING")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.event.rating),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.logging.filter, "info");
        assert_eq!(config.logging.format, LogFormat::Full);
        assert_eq!(config.event.name, "Premiere");
        assert_eq!(config.event.base_price, Money::from_cents(1250));
        assert_eq!(config.event.rating, EventRating::Mid);
    }

    #[test]
    fn test_values_are_read_from_lookup() {
        let config = Config::from_lookup(lookup_from(&[
            ("RUST_LOG", "showtime_schedule=debug"),
            ("LOG_FORMAT", "Compact"),
            ("SHOWTIME_EVENT_NAME", "Late Show"),
            ("SHOWTIME_BASE_PRICE", "9.5"),
            ("SHOWTIME_RATING", "high"),
        ]));

        assert_eq!(config.logging.filter, "showtime_schedule=debug");
        assert_eq!(config.logging.format, LogFormat::Compact);
        assert_eq!(config.event.name, "Late Show");
        assert_eq!(config.event.base_price, Money::from_cents(950));
        assert_eq!(config.event.rating, EventRating::High);
    }

    #[test]
    fn test_unparsable_values_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("LOG_FORMAT", "xml"),
            ("SHOWTIME_BASE_PRICE", "-3"),
            ("SHOWTIME_RATING", "extreme"),
        ]));

        assert_eq!(config.logging.format, LogFormat::Full);
        assert_eq!(config.event.base_price, Money::from_cents(1250));
        assert_eq!(config.event.rating, EventRating::Mid);
    }
}
