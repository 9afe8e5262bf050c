//! The event aggregate: one screening title and its schedule.
//!
//! An [`Event`] owns two correlated ordered containers:
//!
//! ```text
//! air_dates:    { T1, T2, T3 }            ordered set, ascending
//! auditoriums:  { T1 → "Hall A", T3 → "Hall B" }   ordered map, same order
//!
//! keys(auditoriums) ⊆ air_dates
//! ```
//!
//! An air date may be unassigned (T2 above); an assignment may never exist
//! without its air date. The five mutators below keep that true. None of them
//! can fail loudly: each returns `true` when it changed something and `false`
//! when it left the event exactly as it was, either because a precondition was
//! not met or because the event was already in the requested state.

use crate::error::{Result, ScheduleError};
use crate::types::{AirDate, AuditoriumId, EventId, EventRating, Money};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::hash::{Hash, Hasher};
use std::ops::Bound;

/// A recurring event and the instants it airs at
///
/// Two events are equal when their names are equal (two unnamed events are
/// equal to each other); schedule, price, rating and [`EventId`] are ignored.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "EventRecord")]
pub struct Event {
    id: EventId,
    name: Option<String>,
    base_price: Money,
    rating: EventRating,
    air_dates: BTreeSet<AirDate>,
    auditoriums: BTreeMap<AirDate, AuditoriumId>,
}

impl Event {
    /// Creates an unnamed event with an empty schedule
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: EventId::new(),
            name: None,
            base_price: Money::ZERO,
            rating: EventRating::default(),
            air_dates: BTreeSet::new(),
            auditoriums: BTreeMap::new(),
        }
    }

    /// Creates a named event with an empty schedule
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::new().with_name(name)
    }

    /// Sets the name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the base price
    #[must_use]
    pub fn with_base_price(mut self, base_price: Money) -> Self {
        self.base_price = base_price;
        self
    }

    /// Sets the rating
    #[must_use]
    pub fn with_rating(mut self, rating: EventRating) -> Self {
        self.rating = rating;
        self
    }

    // ------------------------------------------------------------------
    // Scalar fields
    // ------------------------------------------------------------------

    /// Surrogate id
    #[must_use]
    pub const fn id(&self) -> EventId {
        self.id
    }

    /// Name, if any
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Renames the event. This changes its equality and hash.
    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    /// Base ticket price
    #[must_use]
    pub const fn base_price(&self) -> Money {
        self.base_price
    }

    /// Sets the base ticket price
    pub const fn set_base_price(&mut self, base_price: Money) {
        self.base_price = base_price;
    }

    /// Content rating
    #[must_use]
    pub const fn rating(&self) -> EventRating {
        self.rating
    }

    /// Sets the content rating
    pub const fn set_rating(&mut self, rating: EventRating) {
        self.rating = rating;
    }

    // ------------------------------------------------------------------
    // Schedule mutators
    // ------------------------------------------------------------------

    /// Adds an air date.
    ///
    /// Returns `false` if it was already scheduled.
    pub fn add_air_date(&mut self, air_date: AirDate) -> bool {
        self.air_dates.insert(air_date)
    }

    /// Adds an air date and assigns `auditorium` to it.
    ///
    /// The auditorium is only recorded when the air date is new. If the air
    /// date already exists the call does nothing at all, even when a
    /// different auditorium is assigned to it; use
    /// [`assign_auditorium`](Self::assign_auditorium) to rebind.
    pub fn add_air_date_with_auditorium(&mut self, air_date: AirDate, auditorium: AuditoriumId) -> bool {
        let added = self.add_air_date(air_date);
        if added {
            self.auditoriums.insert(air_date, auditorium);
        }
        added
    }

    /// Assigns `auditorium` to an existing air date, replacing any previous
    /// assignment.
    ///
    /// Returns `false`, and changes nothing, if `air_date` is not scheduled.
    /// This is the only way an assignment is made for a date that already
    /// airs.
    pub fn assign_auditorium(&mut self, air_date: AirDate, auditorium: AuditoriumId) -> bool {
        if !self.air_dates.contains(&air_date) {
            return false;
        }
        self.auditoriums.insert(air_date, auditorium);
        true
    }

    /// Removes the auditorium assignment of an air date, keeping the air date.
    ///
    /// Returns `false` if nothing was assigned.
    pub fn remove_auditorium_assignment(&mut self, air_date: &AirDate) -> bool {
        self.auditoriums.remove(air_date).is_some()
    }

    /// Removes an air date together with its auditorium assignment.
    ///
    /// Returns `false` if the date was not scheduled. Whether an assignment
    /// existed is not reported.
    pub fn remove_air_date(&mut self, air_date: &AirDate) -> bool {
        let removed = self.air_dates.remove(air_date);
        if removed {
            if let Some(released) = self.auditoriums.remove(air_date) {
                tracing::trace!("Released auditorium {} with air date {}", released, air_date);
            }
        }
        removed
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// All air dates, ascending
    #[must_use]
    pub const fn air_dates(&self) -> &BTreeSet<AirDate> {
        &self.air_dates
    }

    /// All assignments, ascending by air date
    #[must_use]
    pub const fn auditoriums(&self) -> &BTreeMap<AirDate, AuditoriumId> {
        &self.auditoriums
    }

    /// Whether the event airs at `air_date`
    #[must_use]
    pub fn is_aired_on(&self, air_date: &AirDate) -> bool {
        self.air_dates.contains(air_date)
    }

    /// Auditorium assigned to `air_date`, if any
    #[must_use]
    pub fn auditorium_at(&self, air_date: &AirDate) -> Option<&AuditoriumId> {
        self.auditoriums.get(air_date)
    }

    /// Air dates in `from..=to`, ascending. Empty when `from > to`.
    pub fn air_dates_between(&self, from: AirDate, to: AirDate) -> impl Iterator<Item = &AirDate> + '_ {
        let range = (from <= to).then(|| self.air_dates.range(from..=to));
        range.into_iter().flatten()
    }

    /// First air date strictly after `after`
    #[must_use]
    pub fn next_air_date_after(&self, after: &AirDate) -> Option<&AirDate> {
        self.air_dates
            .range((Bound::Excluded(after), Bound::Unbounded))
            .next()
    }

    /// Air dates without an auditorium, ascending
    pub fn unassigned_air_dates(&self) -> impl Iterator<Item = &AirDate> + '_ {
        self.air_dates
            .iter()
            .filter(|air_date| !self.auditoriums.contains_key(*air_date))
    }

    /// Air dates assigned to `auditorium`, ascending
    pub fn air_dates_in<'a>(&'a self, auditorium: &'a AuditoriumId) -> impl Iterator<Item = &'a AirDate> + 'a {
        self.auditoriums
            .iter()
            .filter(move |(_, assigned)| *assigned == auditorium)
            .map(|(air_date, _)| air_date)
    }

    // ------------------------------------------------------------------
    // Unchecked bulk access
    // ------------------------------------------------------------------

    /// Replaces every air date at once.
    ///
    /// **Unchecked**: assignments are left as they are, so this can leave an
    /// assignment without its air date. Call [`validate`](Self::validate)
    /// afterwards if that matters to the caller.
    pub fn replace_air_dates(&mut self, air_dates: BTreeSet<AirDate>) -> BTreeSet<AirDate> {
        std::mem::replace(&mut self.air_dates, air_dates)
    }

    /// Replaces every assignment at once.
    ///
    /// **Unchecked**: keys are not compared against the air dates. Call
    /// [`validate`](Self::validate) afterwards if that matters to the caller.
    pub fn replace_auditoriums(
        &mut self,
        auditoriums: BTreeMap<AirDate, AuditoriumId>,
    ) -> BTreeMap<AirDate, AuditoriumId> {
        std::mem::replace(&mut self.auditoriums, auditoriums)
    }

    /// Checks that every assignment is keyed by a scheduled air date.
    ///
    /// # Errors
    ///
    /// [`ScheduleError::OrphanedAssignment`] for the earliest assignment whose
    /// date is not an air date.
    pub fn validate(&self) -> Result<()> {
        match self
            .auditoriums
            .iter()
            .find(|(air_date, _)| !self.air_dates.contains(*air_date))
        {
            Some((air_date, auditorium)) => Err(ScheduleError::OrphanedAssignment {
                air_date: *air_date,
                auditorium: auditorium.to_string(),
            }),
            None => Ok(()),
        }
    }
}

impl Default for Event {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Event {}

impl Hash for Event {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// Serialized shape of an [`Event`]; deserializing goes through
/// [`Event::validate`] so stored data cannot smuggle in orphaned assignments.
#[derive(Deserialize)]
struct EventRecord {
    id: EventId,
    name: Option<String>,
    base_price: Money,
    rating: EventRating,
    #[serde(default)]
    air_dates: BTreeSet<AirDate>,
    #[serde(default)]
    auditoriums: BTreeMap<AirDate, AuditoriumId>,
}

impl TryFrom<EventRecord> for Event {
    type Error = ScheduleError;

    fn try_from(record: EventRecord) -> Result<Self> {
        let event = Self {
            id: record.id,
            name: record.name,
            base_price: record.base_price,
            rating: record.rating,
            air_dates: record.air_dates,
            auditoriums: record.auditoriums,
        };
        event.validate()?;
        Ok(event)
    }
}
