//! The set of behavioral states an agent carries.

use rustc_hash::FxHashMap;

use horde_behavior::{
    AgentState, AlertedState, AttackState, FeedingState, IdleState, PatrolState, PursuitState,
};
use horde_core::StateKind;

/// Registered states, keyed by kind.
///
/// A controller looks up the current state every tick; a kind with no entry
/// suspends the machine for that tick, and transitions into an unregistered
/// kind fall back to `Idle` (or stay suspended if even `Idle` is missing).
pub struct StateSet {
    states: FxHashMap<StateKind, Box<dyn AgentState>>,
}

impl StateSet {
    /// An empty set.  Mostly useful in tests; real agents want
    /// [`standard`][StateSet::standard].
    pub fn new() -> StateSet {
        StateSet { states: FxHashMap::default() }
    }

    /// The full six-state repertoire.
    pub fn standard() -> StateSet {
        let mut set = StateSet::new();
        set.register(Box::new(IdleState::new()));
        set.register(Box::new(PatrolState::new()));
        set.register(Box::new(AlertedState::new()));
        set.register(Box::new(PursuitState::new()));
        set.register(Box::new(AttackState::new()));
        set.register(Box::new(FeedingState::new()));
        set
    }

    /// Insert (or replace) a state under its own kind.
    pub fn register(&mut self, state: Box<dyn AgentState>) {
        self.states.insert(state.kind(), state);
    }

    pub fn contains(&self, kind: StateKind) -> bool {
        self.states.contains_key(&kind)
    }

    pub fn get_mut(&mut self, kind: StateKind) -> Option<&mut (dyn AgentState + '_)> {
        self.states.get_mut(&kind).map(|s| &mut **s as &mut dyn AgentState)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl Default for StateSet {
    fn default() -> StateSet {
        StateSet::standard()
    }
}
