//! Air-date schedule for a single screening event.
//!
//! An [`Event`] is a recurring title (a film, a concert recording) that airs
//! at several instants. Each instant may be bound to one auditorium, but only
//! once it is a scheduled air date:
//!
//! ```text
//! add_air_date(T1)                   → true
//! add_air_date_with_auditorium(T2, A) → true     T2 → A
//! assign_auditorium(T3, B)           → false    T3 is not an air date
//! assign_auditorium(T1, B)           → true     T1 → B
//! remove_air_date(T2)                → true     T2 and its assignment gone
//! ```
//!
//! Mutators never panic and never return errors: `false` means nothing changed.
//! When an owner needs to know *why* nothing changed, or wants a log of what
//! did, it drives the event through [`ScheduleReducer`] instead.
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use showtime_schedule::{AirDate, AuditoriumId, Event};
//!
//! let evening = AirDate::new(Utc.with_ymd_and_hms(2025, 3, 1, 20, 0, 0).unwrap());
//! let mut event = Event::named("Premiere");
//!
//! assert!(!event.assign_auditorium(evening, AuditoriumId::new("Blue Hall")));
//! assert!(event.add_air_date(evening));
//! assert!(event.assign_auditorium(evening, AuditoriumId::new("Blue Hall")));
//! assert!(event.remove_air_date(&evening));
//! assert!(event.auditoriums().is_empty());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod event;
pub mod reducer;
pub mod types;

pub use config::Config;
pub use error::{Result, ScheduleError};
pub use event::Event;
pub use reducer::{NameChange, ScheduleAction, ScheduleEnvironment, ScheduleReducer, ScheduleState};
pub use types::*;
