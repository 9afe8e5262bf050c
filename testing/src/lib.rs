//! # Showtime Testing
//!
//! Testing utilities and helpers for the Showtime crates.
//!
//! This crate provides:
//! - A deterministic [`Clock`](showtime_core::environment::Clock)
//! - A Given-When-Then harness for reducers ([`ReducerTest`])
//! - Effect assertion helpers
//! - proptest strategies for time-keyed domain values
//!
//! ## Example
//!
//! ```ignore
//! use showtime_testing::{test_clock, ReducerTest};
//!
//! ReducerTest::new(ScheduleReducer::new())
//!     .with_env(ScheduleEnvironment::new(Arc::new(test_clock())))
//!     .given_state(ScheduleState::new(Event::new()))
//!     .when_action(ScheduleAction::AddAirDate { air_date, auditorium: None })
//!     .then_state(move |state| assert!(state.event.is_aired_on(&air_date)))
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use showtime_core::environment::Clock;

pub mod reducer_test;

/// Mock implementations of environment traits.
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use showtime_testing::mocks::FixedClock;
    /// use showtime_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(super::properties::epoch())
    }
}

/// Test helpers.
pub mod helpers {
    /// Installs a `tracing` subscriber that writes through the test harness.
    ///
    /// Safe to call from every test; only the first call installs anything.
    pub fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "debug".into()),
            )
            .with_test_writer()
            .try_init();
    }
}

/// Property-based testing utilities using proptest.
pub mod properties {
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use proptest::prelude::*;

    /// Reference instant all generated times are offset from (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }

    /// Instants on a half-hour grid across `slots` slots after [`epoch`].
    ///
    /// A small `slots` value makes collisions likely, which is what
    /// idempotency and cascade properties need to see.
    pub fn instant(slots: i64) -> impl Strategy<Value = DateTime<Utc>> {
        (0..slots.max(1)).prop_map(|slot| epoch() + Duration::minutes(30 * slot))
    }

    /// Short lowercase identifiers drawn from a small alphabet.
    pub fn label() -> impl Strategy<Value = String> {
        "[a-c]{1,2}"
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, test_clock};
pub use reducer_test::{ReducerTest, assertions};
