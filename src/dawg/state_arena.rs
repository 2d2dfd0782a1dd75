//! A simple index arena for automaton states.
//!
//! States refer to each other by [`StateId`] rather than by reference, so the
//! arena is a plain growable vector that is frozen into a boxed slice once
//! construction finishes.

use std::fmt;
use std::ops::{Index, IndexMut};

use super::children::State;

/// Index of a state within an automaton.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(usize);

impl StateId {
    /// The root state, representing the empty string.
    pub const ROOT: StateId = StateId(0);

    pub(crate) fn new(index: usize) -> Self {
        StateId(index)
    }

    /// Returns the position of this state in [`Dawg::states`](super::Dawg::states).
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Upper bound on the number of states built from a haystack of `len` bytes.
pub(crate) fn state_bound(len: usize) -> usize {
    len.saturating_mul(2).saturating_sub(1).max(2)
}

/// Growable arena of states, indexed by [`StateId`].
pub(crate) struct StateArena {
    states: Vec<State>,
}

impl StateArena {
    /// Creates an arena holding only the root state.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an arena holding only the root state, with room for the states of a
    /// `haystack_len`-byte haystack.
    pub fn with_capacity(haystack_len: usize) -> Self {
        let mut states = Vec::with_capacity(state_bound(haystack_len));
        states.push(State::root());
        StateArena { states }
    }

    /// Appends a state and returns its id.
    pub fn alloc(&mut self, state: State) -> StateId {
        let id = StateId(self.states.len());
        self.states.push(state);
        id
    }

    /// Returns the number of states in this arena.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Iterates over every state with its id.
    pub fn iter(&self) -> impl Iterator<Item = (StateId, &State)> {
        self.states.iter().enumerate().map(|(i, s)| (StateId(i), s))
    }

    /// Freezes the arena; no state can be added or changed afterwards.
    pub fn into_boxed_slice(self) -> Box<[State]> {
        self.states.into_boxed_slice()
    }
}

impl Index<StateId> for StateArena {
    type Output = State;

    #[inline]
    fn index(&self, id: StateId) -> &State {
        &self.states[id.0]
    }
}

impl IndexMut<StateId> for StateArena {
    #[inline]
    fn index_mut(&mut self, id: StateId) -> &mut State {
        &mut self.states[id.0]
    }
}
