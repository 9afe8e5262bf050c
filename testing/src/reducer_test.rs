//! Given-When-Then harness for reducers.

#![allow(clippy::module_name_repetitions)] // ReducerTest is the natural name

use showtime_core::{effect::Effect, reducer::Reducer};

type StateAssertion<S> = Box<dyn FnOnce(&S)>;

type EffectAssertion<A> = Box<dyn FnOnce(&[Effect<A>])>;

/// Fluent API for testing reducers
///
/// `given_actions` are reduced first and their effects discarded; only the
/// effects of `when_action` reach `then_effects`.
///
/// # Example
///
/// ```ignore
/// ReducerTest::new(ScheduleReducer::new())
///     .with_env(env)
///     .given_state(ScheduleState::default())
///     .given_actions(vec![ScheduleAction::AddAirDate { air_date, auditorium: None }])
///     .when_action(ScheduleAction::RemoveAirDate { air_date })
///     .then_state(|state| assert!(state.event.air_dates().is_empty()))
///     .then_effects(|effects| assertions::assert_effects_count(effects, 1))
///     .run();
/// ```
pub struct ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    reducer: R,
    environment: Option<E>,
    initial_state: Option<S>,
    history: Vec<A>,
    action: Option<A>,
    state_assertions: Vec<StateAssertion<S>>,
    effect_assertions: Vec<EffectAssertion<A>>,
}

impl<R, S, A, E> ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    /// Create a new reducer test with the given reducer
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            environment: None,
            initial_state: None,
            history: Vec::new(),
            action: None,
            state_assertions: Vec::new(),
            effect_assertions: Vec::new(),
        }
    }

    /// Set the environment for the test
    #[must_use]
    pub fn with_env(mut self, env: E) -> Self {
        self.environment = Some(env);
        self
    }

    /// Set the initial state (Given)
    #[must_use]
    pub fn given_state(mut self, state: S) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Actions reduced before the action under test (Given)
    #[must_use]
    pub fn given_actions(mut self, actions: Vec<A>) -> Self {
        self.history = actions;
        self
    }

    /// Set the action to test (When)
    #[must_use]
    pub fn when_action(mut self, action: A) -> Self {
        self.action = Some(action);
        self
    }

    /// Add an assertion about the resulting state (Then)
    #[must_use]
    pub fn then_state<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&S) + 'static,
    {
        self.state_assertions.push(Box::new(assertion));
        self
    }

    /// Add an assertion about the resulting effects (Then)
    #[must_use]
    pub fn then_effects<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&[Effect<A>]) + 'static,
    {
        self.effect_assertions.push(Box::new(assertion));
        self
    }

    /// Run the test and execute all assertions
    ///
    /// # Panics
    ///
    /// Panics if initial state, action, or environment is not set,
    /// or if any assertion fails.
    #[allow(clippy::expect_used)] // Test code can use expect
    pub fn run(self) {
        let mut state = self
            .initial_state
            .expect("Initial state must be set with given_state()");

        let action = self.action.expect("Action must be set with when_action()");

        let env = self
            .environment
            .expect("Environment must be set with with_env()");

        for earlier in self.history {
            let _ = self.reducer.reduce(&mut state, earlier, &env);
        }

        let effects = self.reducer.reduce(&mut state, action, &env);

        for assertion in self.state_assertions {
            assertion(&state);
        }

        for assertion in self.effect_assertions {
            assertion(&effects);
        }
    }
}

/// Helper assertions for effects
pub mod assertions {
    use showtime_core::effect::Effect;

    /// Assert that there are no effects
    ///
    /// # Panics
    ///
    /// Panics if any effect other than [`Effect::None`] is present.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_no_effects<A: std::fmt::Debug>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().all(Effect::is_none),
            "Expected no effects, but found {}: {:?}",
            effects.len(),
            effects
        );
    }

    /// Assert the number of effects
    ///
    /// # Panics
    ///
    /// Panics if the number of effects doesn't match expected.
    pub fn assert_effects_count<A>(effects: &[Effect<A>], expected: usize) {
        assert_eq!(
            effects.len(),
            expected,
            "Expected {} effects, but found {}",
            expected,
            effects.len()
        );
    }

    /// Returns every emitted action across all effects, in order
    #[must_use]
    pub fn emitted<A>(effects: &[Effect<A>]) -> Vec<&A> {
        effects.iter().flat_map(Effect::emitted).collect()
    }

    /// Assert that exactly one action was emitted and that it matches `check`
    ///
    /// # Panics
    ///
    /// Panics if zero or several actions were emitted, or if `check` returns `false`.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_emitted_once<A, F>(effects: &[Effect<A>], check: F)
    where
        A: std::fmt::Debug,
        F: FnOnce(&A) -> bool,
    {
        match emitted(effects).as_slice() {
            [action] => assert!(check(*action), "Emitted action did not match: {action:?}"),
            other => panic!("Expected exactly one emitted action, found {}: {other:?}", other.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showtime_core::SmallVec;

    #[derive(Clone, Debug)]
    struct TestState {
        seats: Vec<u32>,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Book(u32),
        Booked(u32),
    }

    struct TestReducer;

    impl Reducer for TestReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                TestAction::Book(seat) if !state.seats.contains(&seat) => {
                    state.seats.push(seat);
                    smallvec::smallvec![Effect::Emit(TestAction::Booked(seat))]
                },
                TestAction::Book(_) | TestAction::Booked(_) => SmallVec::new(),
            }
        }
    }

    #[test]
    fn test_reducer_test_emits_on_change() {
        ReducerTest::new(TestReducer)
            .with_env(())
            .given_state(TestState { seats: vec![] })
            .when_action(TestAction::Book(7))
            .then_state(|state| {
                assert_eq!(state.seats, vec![7]);
            })
            .then_effects(|effects| {
                assertions::assert_emitted_once(effects, |action| *action == TestAction::Booked(7));
            })
            .run();
    }

    #[test]
    fn test_given_actions_are_applied_first() {
        ReducerTest::new(TestReducer)
            .with_env(())
            .given_state(TestState { seats: vec![] })
            .given_actions(vec![TestAction::Book(7)])
            .when_action(TestAction::Book(7))
            .then_state(|state| {
                assert_eq!(state.seats, vec![7]);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_assertions_no_effects() {
        assertions::assert_no_effects::<TestAction>(&[Effect::None]);
        assertions::assert_no_effects::<TestAction>(&[]);
    }

    #[test]
    fn test_assertions_effects_count() {
        assertions::assert_effects_count(&[Effect::<TestAction>::None], 1);
        assertions::assert_effects_count::<TestAction>(&[], 0);
    }
}
