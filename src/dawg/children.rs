use smallvec::SmallVec;

use super::state_arena::StateId;

/// A compact representation of the outgoing edges of a [`State`] that doesn't allocate
/// until there are more than `SPILL` edges.
///
/// Edges are kept sorted by byte in every variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Children {
    /// No edges.
    None,
    /// Exactly one edge (byte, target).
    One((u8, StateId)),
    /// Exactly two edges (byte1, target1, byte2, target2), `byte1 < byte2`.
    Two((u8, StateId, u8, StateId)),
    /// Three or more edges.
    Many(SmallVec<[(u8, StateId); SPILL]>),
}

/// Number of edges a `Children::Many` holds inline before it spills to the heap.
const SPILL: usize = 6;

impl Children {
    /// Gets the edge at the specified index, in byte order.
    ///
    /// Returns `None` if the index is out of bounds.
    #[inline]
    pub(crate) fn get(&self, index: usize) -> Option<(u8, StateId)> {
        match self {
            Children::None => None,
            Children::One(edge) => match index {
                0 => Some(*edge),
                _ => None,
            },
            Children::Two((b1, s1, b2, s2)) => match index {
                0 => Some((*b1, *s1)),
                1 => Some((*b2, *s2)),
                _ => None,
            },
            Children::Many(edges) => edges.get(index).copied(),
        }
    }

    /// Returns the target of the edge labeled `byte`, if any.
    #[inline]
    pub(crate) fn target(&self, byte: u8) -> Option<StateId> {
        match self {
            Children::None => None,
            Children::One((b, s)) => (*b == byte).then_some(*s),
            Children::Two((b1, s1, b2, s2)) => {
                if byte == *b1 {
                    Some(*s1)
                } else if byte == *b2 {
                    Some(*s2)
                } else {
                    None
                }
            }
            Children::Many(edges) => edges
                .binary_search_by_key(&byte, |&(b, _)| b)
                .ok()
                .map(|pos| edges[pos].1),
        }
    }

    /// Returns the number of edges.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        match self {
            Children::None => 0,
            Children::One(_) => 1,
            Children::Two(_) => 2,
            Children::Many(edges) => edges.len(),
        }
    }

    /// Adds an edge in sorted position.
    ///
    /// The byte must not already have an edge.
    pub(crate) fn insert(&mut self, byte: u8, target: StateId) {
        debug_assert!(self.target(byte).is_none(), "insert: byte already has an edge");
        *self = match std::mem::replace(self, Children::None) {
            Children::None => Children::One((byte, target)),
            Children::One((b1, s1)) => {
                if byte < b1 {
                    Children::Two((byte, target, b1, s1))
                } else {
                    Children::Two((b1, s1, byte, target))
                }
            }
            Children::Two((b1, s1, b2, s2)) => {
                let mut edges: SmallVec<[(u8, StateId); SPILL]> =
                    SmallVec::from_slice(&[(b1, s1), (b2, s2)]);
                let pos = edges.partition_point(|&(b, _)| b < byte);
                edges.insert(pos, (byte, target));
                Children::Many(edges)
            }
            Children::Many(mut edges) => {
                let pos = edges.partition_point(|&(b, _)| b < byte);
                edges.insert(pos, (byte, target));
                Children::Many(edges)
            }
        };
    }

    /// Points the existing edge labeled `byte` at `target`.
    ///
    /// Panics if `byte` has no edge.
    pub(crate) fn redirect(&mut self, byte: u8, target: StateId) {
        let slot = match self {
            Children::None => None,
            Children::One((b, s)) => (*b == byte).then_some(s),
            Children::Two((b1, s1, b2, s2)) => {
                if *b1 == byte {
                    Some(s1)
                } else if *b2 == byte {
                    Some(s2)
                } else {
                    None
                }
            }
            Children::Many(edges) => match edges.binary_search_by_key(&byte, |&(b, _)| b) {
                Ok(pos) => Some(&mut edges[pos].1),
                Err(_) => None,
            },
        };
        *slot.expect("redirect: byte has no edge") = target;
    }
}

/// An iterator over the outgoing edges of a [`State`], in byte order.
#[derive(Clone)]
pub struct ChildIter<'a> {
    children: &'a Children,
    index: usize,
}

impl Iterator for ChildIter<'_> {
    type Item = (u8, StateId);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let edge = self.children.get(self.index)?;
        self.index += 1;
        Some(edge)
    }

    /// Since we know the exact size, we can do better than the default implementation.
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.children.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ChildIter<'_> {}

/// A state in the suffix automaton.
///
/// Every string reaching a state from the root shares the same set of end
/// positions in the haystack; `suffix_len` is the length of the longest of them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
    suffix_len: usize,
    link: Option<StateId>,
    children: Children,
}

impl State {
    /// Creates the root state: empty string, no suffix link.
    pub(crate) fn root() -> Self {
        State {
            suffix_len: 0,
            link: None,
            children: Children::None,
        }
    }

    /// Creates a state without edges.
    pub(crate) fn new(suffix_len: usize, link: StateId) -> Self {
        State {
            suffix_len,
            link: Some(link),
            children: Children::None,
        }
    }

    /// Creates a split-off copy of `self` with a shorter `suffix_len`.
    ///
    /// The copy keeps this state's suffix link and a copy of its edges.
    pub(crate) fn split(&self, suffix_len: usize) -> Self {
        debug_assert!(suffix_len < self.suffix_len);
        State {
            suffix_len,
            link: self.link,
            children: self.children.clone(),
        }
    }

    /// Length of the longest string that reaches this state from the root.
    #[inline]
    pub fn suffix_len(&self) -> usize {
        self.suffix_len
    }

    /// The suffix link, `None` only for the root.
    #[inline]
    pub fn link(&self) -> Option<StateId> {
        self.link
    }

    pub(crate) fn set_link(&mut self, link: StateId) {
        self.link = Some(link);
    }

    /// Returns the state that `byte`'s edge leads to, or None if no such edge exists.
    #[inline]
    pub fn get(&self, byte: u8) -> Option<StateId> {
        self.children.target(byte)
    }

    /// Returns an iterator over all outgoing edges of this state, in byte order.
    ///
    /// The edge table itself stays private to the crate:
    ///
    /// ```compile_fail
    /// use suffix_dawg::dawg::children::Children;
    /// ```
    #[inline]
    pub fn transitions(&self) -> ChildIter<'_> {
        ChildIter {
            children: &self.children,
            index: 0,
        }
    }

    /// Returns the number of outgoing edges.
    #[inline]
    pub fn transition_count(&self) -> usize {
        self.children.len()
    }

    pub(crate) fn children_mut(&mut self) -> &mut Children {
        &mut self.children
    }
}
