//! Value objects for the schedule domain.

use crate::error::{Result, ScheduleError};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// Identifiers
// ============================================================================

/// Surrogate identifier for an event
///
/// Stable for the event's whole life, unlike its name, and never part of
/// event equality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(Uuid);

impl EventId {
    /// Creates a new random `EventId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reference to an externally managed auditorium, by its lookup name
///
/// The event never owns the auditorium record; this is only the key the
/// surrounding service uses to find it.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuditoriumId(String);

impl AuditoriumId {
    /// Creates a new `AuditoriumId`
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the auditorium name
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AuditoriumId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Time
// ============================================================================

/// Instant at which an event airs
///
/// Used purely as an ordered key: no timezone or calendar rules apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AirDate(DateTime<Utc>);

impl AirDate {
    /// Creates a new `AirDate`
    #[must_use]
    pub const fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    /// Returns the inner `DateTime`
    #[must_use]
    pub const fn inner(&self) -> DateTime<Utc> {
        self.0
    }
}

impl From<DateTime<Utc>> for AirDate {
    fn from(at: DateTime<Utc>) -> Self {
        Self(at)
    }
}

/// RFC 3339 in UTC, with only as many fraction digits as the instant needs,
/// so distinct air dates never print alike.
impl fmt::Display for AirDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner().to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

// ============================================================================
// Money Value Object (cents-based to avoid floating point errors)
// ============================================================================

/// Non-negative amount in cents
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(u64);

impl Money {
    /// Zero
    pub const ZERO: Self = Self(0);

    /// Creates a `Money` value from cents
    #[must_use]
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Creates a `Money` value from whole units, `None` on overflow
    #[must_use]
    pub const fn checked_from_units(units: u64) -> Option<Self> {
        match units.checked_mul(100) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// Returns the amount in cents
    #[must_use]
    pub const fn cents(&self) -> u64 {
        self.0
    }

    /// Returns the whole units (rounded down)
    #[must_use]
    pub const fn units(&self) -> u64 {
        self.0 / 100
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.units(), self.0 % 100)
    }
}

/// Parses `"12"`, `"12.5"` or `"12.50"`. Negative amounts, a dot without
/// fraction digits, more than two fraction digits and overflow are rejected.
impl FromStr for Money {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || ScheduleError::InvalidPrice {
            input: s.to_string(),
        };
        let trimmed = s.trim();
        let (whole, fraction) = match trimmed.split_once('.') {
            Some((_, "")) => return Err(invalid()),
            Some(parts) => parts,
            None => (trimmed, ""),
        };

        if whole.is_empty() || fraction.len() > 2 {
            return Err(invalid());
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let units: u64 = whole.parse().map_err(|_| invalid())?;
        let cents: u64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };

        Self::checked_from_units(units)
            .and_then(|base| base.0.checked_add(cents))
            .map(Self)
            .ok_or_else(invalid)
    }
}

// ============================================================================
// Rating
// ============================================================================

/// Content rating of an event
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventRating {
    /// Low demand
    Low,
    /// Regular demand
    #[default]
    Mid,
    /// High demand
    High,
}

impl EventRating {
    /// All ratings, lowest first
    pub const ALL: [Self; 3] = [Self::Low, Self::Mid, Self::High];

    /// Lowercase name used in configuration and serialized form
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Mid => "mid",
            Self::High => "high",
        }
    }
}

impl fmt::Display for EventRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventRating {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|rating| rating.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ScheduleError::UnknownRating {
                input: s.to_string(),
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_money_parses_plain_and_fractional_amounts() {
        assert_eq!("12".parse::<Money>().unwrap(), Money::from_cents(1200));
        assert_eq!("12.5".parse::<Money>().unwrap(), Money::from_cents(1250));
        assert_eq!(" 0.07 ".parse::<Money>().unwrap(), Money::from_cents(7));
    }

    #[test]
    fn test_money_rejects_malformed_amounts() {
        for input in ["", "-1", "1.234", "abc", ".5", "1.x", "+3", "12.", " 7. "] {
            assert!(
                matches!(input.parse::<Money>(), Err(ScheduleError::InvalidPrice { .. })),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_money_rejects_overflow() {
        let too_big = format!("{}", u64::MAX);
        assert!(too_big.parse::<Money>().is_err());
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::from_cents(1250).to_string(), "12.50");
        assert_eq!(Money::ZERO.to_string(), "0.00");
    }

    #[test]
    fn test_rating_parse_is_case_insensitive() {
        assert_eq!("HIGH".parse::<EventRating>().unwrap(), EventRating::High);
        assert_eq!("low".parse::<EventRating>().unwrap(), EventRating::Low);
        assert!(matches!(
            "extreme".parse::<EventRating>(),
            Err(ScheduleError::UnknownRating { .. })
        ));
    }

    #[test]
    fn test_air_dates_order_by_instant() {
        let early = AirDate::new(Utc.with_ymd_and_hms(2025, 3, 1, 18, 0, 0).unwrap());
        let late = AirDate::new(Utc.with_ymd_and_hms(2025, 3, 1, 21, 0, 0).unwrap());
        assert!(early < late);
        assert_eq!(early.to_string(), "2025-03-01T18:00:00Z");
    }

    #[test]
    fn test_air_dates_seconds_apart_display_differently() {
        let on_the_hour = AirDate::new(Utc.with_ymd_and_hms(2025, 1, 1, 18, 0, 0).unwrap());
        let half_minute_later = AirDate::new(Utc.with_ymd_and_hms(2025, 1, 1, 18, 0, 30).unwrap());

        assert_ne!(on_the_hour.to_string(), half_minute_later.to_string());
        assert_eq!(half_minute_later.to_string(), "2025-01-01T18:00:30Z");
    }

    #[test]
    fn test_air_date_serializes_as_rfc3339_string() {
        let at = AirDate::new(Utc.with_ymd_and_hms(2025, 3, 1, 18, 0, 0).unwrap());
        let json = serde_json::to_string(&at).unwrap();
        assert_eq!(json, "\"2025-03-01T18:00:00Z\"");
    }
}
