use std::error::Error;

use super::automaton::Dawg;
use super::children::State;
use super::config::Config;
use super::state_arena::{StateArena, StateId};

/// An online builder for the suffix automaton of a haystack.
///
/// Bytes are appended one at a time; after every [`push`](Builder::push) the
/// states describe exactly the substrings of the bytes seen so far. The builder
/// is consumed by [`build`](Builder::build), which derives the terminal states and
/// freezes the automaton.
pub struct Builder {
    arena: StateArena,
    /// State of the whole prefix pushed so far.
    last: StateId,
    len: usize,
}

impl Builder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Builder {
            arena: StateArena::new(),
            last: StateId::ROOT,
            len: 0,
        }
    }

    /// Creates an empty builder with room for the states of a `haystack_len`-byte haystack.
    pub fn with_capacity(haystack_len: usize) -> Self {
        Builder {
            arena: StateArena::with_capacity(haystack_len),
            last: StateId::ROOT,
            len: 0,
        }
    }

    /// Number of bytes pushed so far.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if no byte has been pushed yet.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of states allocated so far, including the root.
    pub fn state_count(&self) -> usize {
        self.arena.len()
    }

    /// Appends one byte to the haystack.
    pub fn push(&mut self, byte: u8) {
        self.len += 1;
        let r = self.arena.alloc(State::new(self.len, StateId::ROOT));

        // Give every suffix of the old haystack that can't yet be extended by
        // `byte` an edge to `r`, stopping at the first one that can.
        let mut cursor = Some(self.last);
        let stop = loop {
            let Some(p) = cursor else { break None };
            match self.arena[p].get(byte) {
                Some(q) => break Some((p, q)),
                None => {
                    self.arena[p].children_mut().insert(byte, r);
                    cursor = self.arena[p].link();
                }
            }
        };

        if let Some((p, q)) = stop {
            let split_len = self.arena[p].suffix_len() + 1;
            if self.arena[q].suffix_len() == split_len {
                self.arena[r].set_link(q);
            } else {
                self.split(p, q, r, byte, split_len);
            }
        }
        self.last = r;
    }

    /// Appends every byte of `bytes` to the haystack.
    pub fn extend_from_slice(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.push(byte);
        }
    }

    /// Splits `q`, reached from `p` over `byte`, so that the strings of length
    /// `split_len` and shorter move to a new clone state.
    fn split(&mut self, p: StateId, q: StateId, r: StateId, byte: u8, split_len: usize) {
        let clone = self.arena[q].split(split_len);
        let clone = self.arena.alloc(clone);
        log::trace!(
            "splitting state {q} (len {}) at len {split_len} into {clone}",
            self.arena[q].suffix_len()
        );
        self.arena[q].set_link(clone);
        self.arena[r].set_link(clone);

        let mut cursor = Some(p);
        while let Some(p) = cursor {
            if self.arena[p].get(byte) != Some(q) {
                break;
            }
            self.arena[p].children_mut().redirect(byte, clone);
            cursor = self.arena[p].link();
        }
    }

    /// Marks every state on the suffix-link chain from `last` to the root.
    fn terminal_set(&self) -> Box<[bool]> {
        let mut terminal = vec![false; self.arena.len()];
        let mut cursor = Some(self.last);
        while let Some(id) = cursor {
            terminal[id.index()] = true;
            cursor = self.arena[id].link();
        }
        terminal.into_boxed_slice()
    }

    /// Checks the suffix-link tree and the transition lengths.
    fn is_well_formed(&self) -> bool {
        self.arena.iter().all(|(id, state)| {
            let link_ok = match state.link() {
                None => id == StateId::ROOT && state.suffix_len() == 0,
                Some(link) => self.arena[link].suffix_len() < state.suffix_len(),
            };
            link_ok
                && state
                    .transitions()
                    .all(|(_, t)| self.arena[t].suffix_len() > state.suffix_len())
        })
    }

    /// Finalizes the automaton.
    ///
    /// Derives the terminal states from the suffix-link chain of the whole
    /// haystack and freezes the states so they can no longer change.
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::EmptyHaystack` if no byte was pushed.
    pub fn build(self, config: Config) -> Result<Dawg, BuilderError> {
        if self.is_empty() {
            return Err(BuilderError::EmptyHaystack);
        }
        debug_assert!(self.is_well_formed(), "suffix automaton invariants violated");

        let terminal = self.terminal_set();
        log::debug!(
            "built suffix automaton over {} bytes: {} states, {} terminal",
            self.len,
            self.arena.len(),
            terminal.iter().filter(|&&t| t).count()
        );
        Ok(Dawg::from_parts(
            self.arena.into_boxed_slice(),
            terminal,
            self.len,
            config,
        ))
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<u8> for Builder {
    fn extend<I: IntoIterator<Item = u8>>(&mut self, iter: I) {
        for byte in iter {
            self.push(byte);
        }
    }
}

impl<'a> Extend<&'a u8> for Builder {
    fn extend<I: IntoIterator<Item = &'a u8>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl std::fmt::Debug for Builder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Builder")
            .field("len", &self.len)
            .field("state_count", &self.arena.len())
            .finish()
    }
}

/// Errors that can occur when building a suffix automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderError {
    /// The haystack was empty; an automaton needs at least one byte.
    EmptyHaystack,
}

impl std::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuilderError::EmptyHaystack => write!(f, "EmptyHaystack - haystack must not be empty"),
        }
    }
}

impl Error for BuilderError {}

/// Builds the suffix automaton of `haystack`.
///
/// # Examples
///
/// ```
/// use suffix_dawg::dawg::builder::build_dawg;
/// use suffix_dawg::dawg::Config;
///
/// let dawg = build_dawg("hello world", Config::default()).unwrap();
/// assert!(dawg.substr("lo wor"));
/// assert!(dawg.suffix("world"));
/// assert!(!dawg.suffix("hello"));
/// ```
///
/// Any byte is a valid symbol:
///
/// ```
/// use suffix_dawg::dawg::builder::build_dawg;
/// use suffix_dawg::dawg::Config;
///
/// let dawg = build_dawg([0u8, 255, 0, 128], Config::default()).unwrap();
/// assert!(dawg.substr([255u8, 0]));
/// assert!(dawg.suffix([0u8, 128]));
/// assert!(!dawg.substr([128u8, 0]));
/// ```
///
/// # Errors
///
/// Returns `BuilderError::EmptyHaystack` if `haystack` is empty.
pub fn build_dawg(haystack: impl AsRef<[u8]>, config: Config) -> Result<Dawg, BuilderError> {
    let haystack = haystack.as_ref();
    let mut builder = Builder::with_capacity(haystack.len());
    builder.extend_from_slice(haystack);
    builder.build(config)
}
