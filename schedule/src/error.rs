//! Error types for schedule operations.
//!
//! The five schedule mutators on [`Event`](crate::Event) never return these;
//! they report through `bool`. Errors surface from the reducer (which names
//! why a command was rejected), from invariant checks after an unchecked bulk
//! replacement, and from parsing configuration values.

use crate::types::AirDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for schedule operations.
pub type Result<T> = std::result::Result<T, ScheduleError>;

/// Every failure mode outside the `bool`-returning mutators.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduleError {
    // ═══════════════════════════════════════════════════════════
    // Rejected commands
    // ═══════════════════════════════════════════════════════════

    /// The air date is already on the schedule.
    #[error("{air_date} is already scheduled")]
    AlreadyScheduled {
        /// Offending air date
        air_date: AirDate,
    },

    /// The air date is not on the schedule.
    #[error("{air_date} is not a scheduled air date")]
    NotScheduled {
        /// Offending air date
        air_date: AirDate,
    },

    /// No auditorium is assigned to the air date.
    #[error("no auditorium is assigned to {air_date}")]
    NoAssignment {
        /// Offending air date
        air_date: AirDate,
    },

    /// A details update carried no fields.
    #[error("no fields to update")]
    NothingToUpdate,

    // ═══════════════════════════════════════════════════════════
    // Invariant violations
    // ═══════════════════════════════════════════════════════════

    /// An auditorium is assigned to a date that is not an air date.
    #[error("auditorium {auditorium} is assigned to {air_date}, which is not an air date")]
    OrphanedAssignment {
        /// Date the assignment is keyed by
        air_date: AirDate,
        /// Auditorium left dangling
        auditorium: String,
    },

    // ═══════════════════════════════════════════════════════════
    // Parsing
    // ═══════════════════════════════════════════════════════════

    /// Text is not a non-negative amount with at most two decimals.
    #[error("invalid price: {input:?}")]
    InvalidPrice {
        /// Rejected text
        input: String,
    },

    /// Text names no known rating.
    #[error("unknown rating: {input:?}")]
    UnknownRating {
        /// Rejected text
        input: String,
    },
}
