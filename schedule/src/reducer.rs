//! Command/event reducer over the [`Event`] aggregate.
//!
//! The bare aggregate answers every mutation with a `bool`. Owners that need
//! a record of what happened drive it through [`ScheduleReducer`] instead:
//! commands are validated against the current schedule, turned into events
//! stamped by the environment clock, applied through the same aggregate
//! mutators, and handed back as [`Effect::Emit`] for the owner to store or
//! publish. Rejected commands say why in [`ScheduleState::last_error`].

use crate::error::ScheduleError;
use crate::event::Event;
use crate::types::{AirDate, AuditoriumId, EventRating, Money};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use showtime_core::{SmallVec, effect::Effect, environment::Clock, reducer::Reducer, smallvec};
use std::sync::Arc;

// ============================================================================
// Actions (Commands + Events)
// ============================================================================

/// How a details update treats the event name
///
/// An absent name is an identity of its own, so clearing it is a change
/// distinct from leaving it alone.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NameChange {
    /// Set a new name
    Rename(String),
    /// Drop the name
    Clear,
}

impl NameChange {
    /// The name the event ends up with
    #[must_use]
    pub fn into_name(self) -> Option<String> {
        match self {
            Self::Rename(name) => Some(name),
            Self::Clear => None,
        }
    }
}

/// Actions for the schedule reducer
///
/// Commands express intent, events record what happened. Replaying the
/// events of a schedule onto a fresh state reproduces it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduleAction {
    // Commands
    /// Schedule a new air date, optionally with its auditorium
    AddAirDate {
        /// Date to add
        air_date: AirDate,
        /// Auditorium to assign if the date is new
        auditorium: Option<AuditoriumId>,
    },

    /// Assign (or reassign) the auditorium of a scheduled air date
    AssignAuditorium {
        /// Scheduled date
        air_date: AirDate,
        /// Auditorium to assign
        auditorium: AuditoriumId,
    },

    /// Drop the auditorium assignment of an air date
    RemoveAuditoriumAssignment {
        /// Scheduled date
        air_date: AirDate,
    },

    /// Unschedule an air date and release its auditorium
    RemoveAirDate {
        /// Date to remove
        air_date: AirDate,
    },

    /// Change name, price or rating; `None` fields stay as they are
    UpdateDetails {
        /// Rename or clear the name
        name: Option<NameChange>,
        /// New base price
        base_price: Option<Money>,
        /// New rating
        rating: Option<EventRating>,
    },

    // Events
    /// An air date was scheduled
    AirDateAdded {
        /// Added date
        air_date: AirDate,
        /// Auditorium assigned together with the date
        auditorium: Option<AuditoriumId>,
        /// When it happened
        recorded_at: DateTime<Utc>,
    },

    /// An auditorium was assigned to an air date
    AuditoriumAssigned {
        /// Air date
        air_date: AirDate,
        /// Newly assigned auditorium
        auditorium: AuditoriumId,
        /// Auditorium it replaced
        previous: Option<AuditoriumId>,
        /// When it happened
        recorded_at: DateTime<Utc>,
    },

    /// An auditorium assignment was removed
    AuditoriumUnassigned {
        /// Air date
        air_date: AirDate,
        /// Auditorium that was assigned
        auditorium: AuditoriumId,
        /// When it happened
        recorded_at: DateTime<Utc>,
    },

    /// An air date was unscheduled
    AirDateRemoved {
        /// Removed date
        air_date: AirDate,
        /// Auditorium released along with it
        released_auditorium: Option<AuditoriumId>,
        /// When it happened
        recorded_at: DateTime<Utc>,
    },

    /// Scalar details changed
    DetailsUpdated {
        /// Name change, if any
        name: Option<NameChange>,
        /// New base price, if changed
        base_price: Option<Money>,
        /// New rating, if changed
        rating: Option<EventRating>,
        /// When it happened
        recorded_at: DateTime<Utc>,
    },

    /// A command was rejected
    CommandRejected {
        /// Why
        error: ScheduleError,
    },
}

impl ScheduleAction {
    /// Returns true if this action is a command
    #[must_use]
    pub const fn is_command(&self) -> bool {
        matches!(
            self,
            Self::AddAirDate { .. }
                | Self::AssignAuditorium { .. }
                | Self::RemoveAuditoriumAssignment { .. }
                | Self::RemoveAirDate { .. }
                | Self::UpdateDetails { .. }
        )
    }

    /// Returns true if this action is an event
    #[must_use]
    pub const fn is_event(&self) -> bool {
        !self.is_command()
    }

    /// Stable type name, used when events are stored or published
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::AddAirDate { .. } => "AddAirDate",
            Self::AssignAuditorium { .. } => "AssignAuditorium",
            Self::RemoveAuditoriumAssignment { .. } => "RemoveAuditoriumAssignment",
            Self::RemoveAirDate { .. } => "RemoveAirDate",
            Self::UpdateDetails { .. } => "UpdateDetails",
            Self::AirDateAdded { .. } => "AirDateAdded.v1",
            Self::AuditoriumAssigned { .. } => "AuditoriumAssigned.v1",
            Self::AuditoriumUnassigned { .. } => "AuditoriumUnassigned.v1",
            Self::AirDateRemoved { .. } => "AirDateRemoved.v1",
            Self::DetailsUpdated { .. } => "DetailsUpdated.v1",
            Self::CommandRejected { .. } => "CommandRejected.v1",
        }
    }
}

// ============================================================================
// State
// ============================================================================

/// State owned by the schedule reducer
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ScheduleState {
    /// The event being scheduled
    pub event: Event,
    /// Number of events applied to `event`
    pub version: u64,
    /// Why the last command was rejected, cleared by the next applied event
    pub last_error: Option<ScheduleError>,
}

impl ScheduleState {
    /// Wraps an event at version 0
    #[must_use]
    pub const fn new(event: Event) -> Self {
        Self {
            event,
            version: 0,
            last_error: None,
        }
    }
}

// ============================================================================
// Environment
// ============================================================================

/// Environment dependencies for the schedule reducer
#[derive(Clone)]
pub struct ScheduleEnvironment {
    /// Clock for event timestamps
    pub clock: Arc<dyn Clock>,
}

impl ScheduleEnvironment {
    /// Creates a new `ScheduleEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

// ============================================================================
// Reducer
// ============================================================================

/// Reducer for one event's schedule
#[derive(Clone, Copy, Debug, Default)]
pub struct ScheduleReducer;

impl ScheduleReducer {
    /// Creates a new `ScheduleReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn validate_add_air_date(event: &Event, air_date: AirDate) -> Result<(), ScheduleError> {
        if event.is_aired_on(&air_date) {
            return Err(ScheduleError::AlreadyScheduled { air_date });
        }
        Ok(())
    }

    fn validate_scheduled(event: &Event, air_date: AirDate) -> Result<(), ScheduleError> {
        if !event.is_aired_on(&air_date) {
            return Err(ScheduleError::NotScheduled { air_date });
        }
        Ok(())
    }

    fn validate_update_details(
        name: Option<&NameChange>,
        base_price: Option<&Money>,
        rating: Option<&EventRating>,
    ) -> Result<(), ScheduleError> {
        if name.is_none() && base_price.is_none() && rating.is_none() {
            return Err(ScheduleError::NothingToUpdate);
        }
        Ok(())
    }

    /// Applies an event to state.
    ///
    /// Returns `false` when the event does not fit the current schedule
    /// (a replayed duplicate, for instance); the state is then left as is.
    fn apply_event(state: &mut ScheduleState, action: &ScheduleAction) -> bool {
        let applied = match action {
            ScheduleAction::AirDateAdded {
                air_date,
                auditorium,
                ..
            } => match auditorium {
                Some(auditorium) => state
                    .event
                    .add_air_date_with_auditorium(*air_date, auditorium.clone()),
                None => state.event.add_air_date(*air_date),
            },
            ScheduleAction::AuditoriumAssigned {
                air_date,
                auditorium,
                ..
            } => state.event.assign_auditorium(*air_date, auditorium.clone()),
            ScheduleAction::AuditoriumUnassigned { air_date, .. } => {
                state.event.remove_auditorium_assignment(air_date)
            },
            ScheduleAction::AirDateRemoved { air_date, .. } => state.event.remove_air_date(air_date),
            ScheduleAction::DetailsUpdated {
                name,
                base_price,
                rating,
                ..
            } => {
                if let Some(name) = name {
                    state.event.set_name(name.clone().into_name());
                }
                if let Some(base_price) = base_price {
                    state.event.set_base_price(*base_price);
                }
                if let Some(rating) = rating {
                    state.event.set_rating(*rating);
                }
                true
            },
            ScheduleAction::CommandRejected { error } => {
                state.last_error = Some(error.clone());
                return false;
            },
            // Commands don't modify state
            ScheduleAction::AddAirDate { .. }
            | ScheduleAction::AssignAuditorium { .. }
            | ScheduleAction::RemoveAuditoriumAssignment { .. }
            | ScheduleAction::RemoveAirDate { .. }
            | ScheduleAction::UpdateDetails { .. } => return false,
        };

        if applied {
            state.version += 1;
            state.last_error = None;
        } else {
            tracing::debug!(
                "Skipped {} that does not fit the current schedule",
                action.event_type()
            );
        }
        applied
    }

    fn reject(state: &mut ScheduleState, error: ScheduleError) -> SmallVec<[Effect<ScheduleAction>; 4]> {
        tracing::debug!("Rejected schedule command: {}", error);
        Self::apply_event(state, &ScheduleAction::CommandRejected { error });
        SmallVec::new()
    }

    fn commit(state: &mut ScheduleState, event: ScheduleAction) -> SmallVec<[Effect<ScheduleAction>; 4]> {
        Self::apply_event(state, &event);
        tracing::debug!(
            "Applied {} (version {})",
            event.event_type(),
            state.version
        );
        smallvec![Effect::Emit(event)]
    }
}

impl Reducer for ScheduleReducer {
    type State = ScheduleState;
    type Action = ScheduleAction;
    type Environment = ScheduleEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Commands ==========
            ScheduleAction::AddAirDate {
                air_date,
                auditorium,
            } => {
                if let Err(error) = Self::validate_add_air_date(&state.event, air_date) {
                    return Self::reject(state, error);
                }

                let event = ScheduleAction::AirDateAdded {
                    air_date,
                    auditorium,
                    recorded_at: env.clock.now(),
                };
                Self::commit(state, event)
            },

            ScheduleAction::AssignAuditorium {
                air_date,
                auditorium,
            } => {
                if let Err(error) = Self::validate_scheduled(&state.event, air_date) {
                    return Self::reject(state, error);
                }

                let event = ScheduleAction::AuditoriumAssigned {
                    air_date,
                    previous: state.event.auditorium_at(&air_date).cloned(),
                    auditorium,
                    recorded_at: env.clock.now(),
                };
                Self::commit(state, event)
            },

            ScheduleAction::RemoveAuditoriumAssignment { air_date } => {
                let Some(auditorium) = state.event.auditorium_at(&air_date).cloned() else {
                    return Self::reject(state, ScheduleError::NoAssignment { air_date });
                };

                let event = ScheduleAction::AuditoriumUnassigned {
                    air_date,
                    auditorium,
                    recorded_at: env.clock.now(),
                };
                Self::commit(state, event)
            },

            ScheduleAction::RemoveAirDate { air_date } => {
                if let Err(error) = Self::validate_scheduled(&state.event, air_date) {
                    return Self::reject(state, error);
                }

                let event = ScheduleAction::AirDateRemoved {
                    air_date,
                    released_auditorium: state.event.auditorium_at(&air_date).cloned(),
                    recorded_at: env.clock.now(),
                };
                Self::commit(state, event)
            },

            ScheduleAction::UpdateDetails {
                name,
                base_price,
                rating,
            } => {
                if let Err(error) =
                    Self::validate_update_details(name.as_ref(), base_price.as_ref(), rating.as_ref())
                {
                    return Self::reject(state, error);
                }

                let event = ScheduleAction::DetailsUpdated {
                    name,
                    base_price,
                    rating,
                    recorded_at: env.clock.now(),
                };
                Self::commit(state, event)
            },

            // ========== Events (replay) ==========
            event => {
                Self::apply_event(state, &event);
                SmallVec::new()
            },
        }
    }
}
