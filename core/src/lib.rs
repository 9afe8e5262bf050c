//! # Showtime Core
//!
//! Small set of abstractions the Showtime crates are built on.
//!
//! Domain state is changed in exactly one place: a [`reducer::Reducer`].
//! A reducer takes the current state, an action and its injected
//! [environment](environment), mutates the state in place and returns
//! [effect](effect) descriptions for the owner to carry out. Reducers never
//! perform I/O themselves.
//!
//! ## Concepts
//!
//! - **State**: owned domain data (an event and its schedule)
//! - **Action**: commands (intent) and events (facts) in one enum
//! - **Reducer**: `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: what the owner should do next, as a value
//! - **Environment**: injected dependencies such as a [`environment::Clock`]
//!
//! ## Example
//!
//! ```
//! use showtime_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! #[derive(Default)]
//! struct Tally {
//!     seen: u32,
//! }
//!
//! struct TallyReducer;
//!
//! impl Reducer for TallyReducer {
//!     type State = Tally;
//!     type Action = u32;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut Tally, action: u32, _env: &()) -> SmallVec<[Effect<u32>; 4]> {
//!         state.seen += action;
//!         smallvec![Effect::Emit(state.seen)]
//!     }
//! }
//!
//! let mut state = Tally::default();
//! let effects = TallyReducer.reduce(&mut state, 3, &());
//! assert_eq!(state.seen, 3);
//! assert_eq!(effects.as_slice(), &[Effect::Emit(3)]);
//! ```

// Re-exported so reducers can build effect lists without their own smallvec dependency
pub use smallvec::{smallvec, SmallVec};

/// Reducer module - the single place where state changes
pub mod reducer {
    use super::SmallVec;
    use super::effect::Effect;

    /// Core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The commands and events this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// Implementations:
        /// 1. Validate the action against the current state
        /// 2. Update state in place
        /// 3. Return effect descriptions for the caller
        ///
        /// A rejected command leaves the domain state untouched.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - side effect descriptions
///
/// Effects are values. The reducer returns them, the owner decides how to
/// carry them out (append to a log, publish, ignore).
pub mod effect {
    /// Describes work for the owner of a reducer
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum Effect<Action> {
        /// Nothing to do
        None,

        /// An action produced by the reducer that the owner should record
        /// or publish. It is not fed back into the reducer.
        Emit(Action),
    }

    impl<Action> Effect<Action> {
        /// Returns `true` for [`Effect::None`]
        #[must_use]
        pub const fn is_none(&self) -> bool {
            matches!(self, Effect::None)
        }

        /// The emitted action, if any
        #[must_use]
        pub const fn emitted(&self) -> Option<&Action> {
            match self {
                Effect::None => None,
                Effect::Emit(action) => Some(action),
            }
        }
    }
}

/// Environment module - dependency injection traits
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time for testability
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Wall clock backed by [`Utc::now`]
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}
