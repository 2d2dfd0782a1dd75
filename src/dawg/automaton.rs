use super::children::State;
use super::config::Config;
use super::state_arena::StateId;

/// A frozen suffix automaton over a byte haystack.
///
/// Answers whether a needle is a substring or a suffix of the haystack in time
/// linear in the needle's length. The automaton is immutable once built, so a
/// `Dawg` can be shared between threads freely.
///
/// # Examples
///
/// ```
/// use suffix_dawg::dawg::{build_dawg, Config};
///
/// let dawg = build_dawg("hello world", Config::default()).unwrap();
///
/// assert!(dawg.substr(""));
/// assert!(dawg.substr("lo wor"));
/// assert!(!dawg.substr("worldhello"));
///
/// assert!(dawg.suffix("d"));
/// assert!(!dawg.suffix("hello"));
/// ```
pub struct Dawg {
    states: Box<[State]>,
    terminal: Box<[bool]>,
    haystack_len: usize,
    config: Config,
}

impl Dawg {
    pub(crate) fn from_parts(
        states: Box<[State]>,
        terminal: Box<[bool]>,
        haystack_len: usize,
        config: Config,
    ) -> Self {
        debug_assert_eq!(states.len(), terminal.len());
        Dawg {
            states,
            terminal,
            haystack_len,
            config,
        }
    }

    /// Returns true if `needle` occurs as a contiguous run of bytes in the haystack.
    ///
    /// The empty needle is a substring of every haystack.
    #[inline]
    pub fn substr(&self, needle: impl AsRef<[u8]>) -> bool {
        self.walk(needle).is_some()
    }

    /// Returns true if the haystack ends with `needle`.
    ///
    /// The empty needle is a suffix of every haystack.
    #[inline]
    pub fn suffix(&self, needle: impl AsRef<[u8]>) -> bool {
        self.walk(needle).is_some_and(|id| self.is_terminal(id))
    }

    /// Follows `needle` from the root and returns the state it ends in, or `None` if
    /// some byte has no edge.
    ///
    /// With [`Config::early_exit`] set, needles longer than the state count are
    /// rejected before walking.
    pub fn walk(&self, needle: impl AsRef<[u8]>) -> Option<StateId> {
        let needle = needle.as_ref();
        if self.config.early_exit && needle.len() > self.states.len() {
            return None;
        }
        needle
            .iter()
            .try_fold(StateId::ROOT, |id, &byte| self.state(id).get(byte))
    }

    /// Returns the length of the longest prefix of `needle` that occurs in the haystack.
    pub fn longest_prefix_match(&self, needle: impl AsRef<[u8]>) -> usize {
        let mut current = StateId::ROOT;
        for (matched, &byte) in needle.as_ref().iter().enumerate() {
            match self.state(current).get(byte) {
                Some(next) => current = next,
                None => return matched,
            }
        }
        needle.as_ref().len()
    }

    /// Returns the number of distinct non-empty substrings of the haystack.
    ///
    /// Each non-root state accounts for the strings between its own length and
    /// the length of its suffix link's state.
    pub fn distinct_substring_count(&self) -> u64 {
        self.states
            .iter()
            .filter_map(|state| {
                let link = state.link()?;
                Some((state.suffix_len() - self.state(link).suffix_len()) as u64)
            })
            .sum()
    }

    /// The root state, reached by the empty needle.
    #[inline]
    pub fn root(&self) -> StateId {
        StateId::ROOT
    }

    /// Returns the state with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this automaton.
    #[inline]
    pub fn state(&self, id: StateId) -> &State {
        &self.states[id.index()]
    }

    /// Returns an iterator over all states, in creation order.
    pub fn states(&self) -> impl ExactSizeIterator<Item = (StateId, &State)> + '_ {
        self.states
            .iter()
            .enumerate()
            .map(|(i, state)| (StateId::new(i), state))
    }

    /// Returns the number of states, including the root.
    #[inline]
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// True if the strings of this state are suffixes of the haystack.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this automaton.
    #[inline]
    pub fn is_terminal(&self, id: StateId) -> bool {
        self.terminal[id.index()]
    }

    /// Returns an iterator over the terminal states, in creation order.
    pub fn terminals(&self) -> impl Iterator<Item = StateId> + '_ {
        self.terminal
            .iter()
            .enumerate()
            .filter(|&(_, &terminal)| terminal)
            .map(|(i, _)| StateId::new(i))
    }

    /// Length of the haystack this automaton was built from.
    #[inline]
    pub fn haystack_len(&self) -> usize {
        self.haystack_len
    }

    /// The configuration this automaton was built with.
    #[inline]
    pub fn config(&self) -> Config {
        self.config
    }
}

impl std::fmt::Debug for Dawg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dawg")
            .field("haystack_len", &self.haystack_len)
            .field("state_count", &self.state_count())
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dawg::build_dawg;
    use crate::dawg::state_arena::state_bound;

    use hashbrown::HashSet;
    use itertools::Itertools;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const HELLO: &str = "hello world";

    fn built(haystack: impl AsRef<[u8]>) -> Dawg {
        build_dawg(haystack, Config::default()).unwrap()
    }

    fn occurs(haystack: &[u8], needle: &[u8]) -> bool {
        needle.is_empty() || haystack.windows(needle.len()).any(|w| w == needle)
    }

    /// Every substring of `haystack`, by (start, end) position.
    fn substrings(haystack: &[u8]) -> impl Iterator<Item = &[u8]> {
        (0..=haystack.len())
            .tuple_combinations::<(usize, usize)>()
            .map(move |(i, j)| &haystack[i..j])
    }

    #[test]
    fn hello_world_substr() {
        let dawg = built(HELLO);
        assert!(dawg.substr(""));
        assert!(dawg.substr("hello world"));
        assert!(dawg.substr("lo wor"));
        assert!(!dawg.substr("HELLO"));
        assert!(!dawg.substr("worldhello"));
        assert!(!dawg.substr("\x00"));
    }

    #[test]
    fn hello_world_suffix() {
        let dawg = built(HELLO);
        assert!(dawg.suffix(""));
        assert!(dawg.suffix("world"));
        assert!(dawg.suffix("d"));
        assert!(dawg.suffix("hello world"));
        assert!(!dawg.suffix("hello"));
        assert!(!dawg.suffix("worlds"));
    }

    #[test]
    fn all_substrings_and_suffixes() {
        let haystack = b"abracadabra";
        let dawg = built(haystack);
        for needle in substrings(haystack) {
            assert!(dawg.substr(needle), "{needle:?}");
            assert_eq!(dawg.suffix(needle), haystack.ends_with(needle), "{needle:?}");
        }
    }

    #[test]
    fn needle_longer_than_haystack() {
        let dawg = built("abc");
        assert!(!dawg.substr("abcabc"));
        assert!(!dawg.suffix("xabc"));
    }

    #[test]
    fn full_byte_alphabet() {
        let haystack: Vec<u8> = (0..=255u8).chain((0..=255u8).rev()).collect();
        let dawg = built(&haystack);
        for b in 0..=255u8 {
            assert!(dawg.substr([b]));
            assert_eq!(dawg.substr([b, b]), b == 255);
        }
        assert!(dawg.substr([0u8, 1, 2]));
        assert!(dawg.substr([2u8, 1, 0]));
        assert!(dawg.suffix([1u8, 0]));
        assert!(!dawg.suffix([0u8, 1]));
        assert!(!dawg.substr([0u8, 0]));
    }

    #[test]
    fn nul_bytes_in_haystack() {
        let dawg = built(b"\x00a\x00\x00");
        assert!(dawg.substr(b"\x00\x00"));
        assert!(dawg.suffix(b"\x00"));
        assert!(dawg.suffix(b"\x00\x00"));
        assert!(!dawg.suffix(b"a\x00"));
        assert!(!dawg.substr(b"\x00\x00\x00"));
    }

    #[test]
    fn queries_are_idempotent() {
        let dawg = built(HELLO);
        for needle in ["", "lo", "hello", "world", "xyz"] {
            let first = (dawg.substr(needle), dawg.suffix(needle));
            for _ in 0..3 {
                assert_eq!((dawg.substr(needle), dawg.suffix(needle)), first);
            }
        }
    }

    #[test]
    fn early_exit_does_not_change_results() {
        let haystack = b"mississippi";
        let plain = built(haystack);
        let early = build_dawg(haystack, Config::new().with_early_exit(true)).unwrap();
        assert!(early.config().early_exit);

        let mut needles: Vec<Vec<u8>> = substrings(haystack).map(<[u8]>::to_vec).collect();
        needles.push(b"mississippimississippi".to_vec());
        needles.push(vec![b's'; 40]);
        needles.push(b"ssippis".to_vec());
        for needle in &needles {
            assert_eq!(plain.substr(needle), early.substr(needle), "{needle:?}");
            assert_eq!(plain.suffix(needle), early.suffix(needle), "{needle:?}");
        }
    }

    #[test]
    fn random_haystacks_match_brute_force() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..200 {
            let len = rng.random_range(1..40usize);
            // A small alphabet produces many repeats, and therefore many splits.
            let alphabet = rng.random_range(1..5u8);
            let haystack: Vec<u8> = (0..len).map(|_| rng.random_range(0..alphabet)).collect();
            let dawg = built(&haystack);
            assert!(dawg.state_count() <= state_bound(len));

            for _ in 0..50 {
                let needle_len = rng.random_range(0..len + 3);
                let needle: Vec<u8> =
                    (0..needle_len).map(|_| rng.random_range(0..alphabet)).collect();
                assert_eq!(dawg.substr(&needle), occurs(&haystack, &needle));
                assert_eq!(dawg.suffix(&needle), haystack.ends_with(&needle));
            }
            for needle in substrings(&haystack) {
                assert!(dawg.substr(needle));
                assert_eq!(dawg.suffix(needle), haystack.ends_with(needle));
            }
        }
    }

    #[test]
    fn random_full_range_haystacks_match_brute_force() {
        let mut rng = StdRng::seed_from_u64(0xff00);
        for round in 0..300 {
            let len = rng.random_range(1..120usize);
            // Draw from a window of the byte range so repeats still occur.
            let low = rng.random_range(0..=252u8);
            let high = low + rng.random_range(1..=3u8);
            let haystack: Vec<u8> = (0..len).map(|_| rng.random_range(low..=high)).collect();
            let config = Config::new().with_early_exit(round % 2 == 0);
            let dawg = build_dawg(&haystack, config).unwrap();

            for _ in 0..100 {
                let needle_len = rng.random_range(0..len + 3);
                let needle: Vec<u8> =
                    (0..needle_len).map(|_| rng.random_range(low..=high)).collect();
                assert_eq!(dawg.substr(&needle), occurs(&haystack, &needle), "{needle:?}");
                assert_eq!(dawg.suffix(&needle), haystack.ends_with(&needle), "{needle:?}");
            }
        }
    }

    #[test]
    fn states_satisfy_link_invariants() {
        let dawg = built(b"abcbcabcbbca\x00\xff\xff");
        for (id, state) in dawg.states() {
            match state.link() {
                None => assert_eq!(id, dawg.root()),
                Some(link) => assert!(dawg.state(link).suffix_len() < state.suffix_len()),
            }
            for (_, target) in state.transitions() {
                assert!(dawg.state(target).suffix_len() > state.suffix_len());
            }
        }
        assert_eq!(dawg.state(dawg.root()).suffix_len(), 0);
    }

    #[test]
    fn terminals_are_exactly_the_suffix_states() {
        let haystack = b"abcbcabcbbca";
        let dawg = built(haystack);
        let suffix_states: HashSet<StateId> = (0..=haystack.len())
            .map(|i| dawg.walk(&haystack[i..]).unwrap())
            .collect();
        let terminals: HashSet<StateId> = dawg.terminals().collect();
        assert_eq!(suffix_states, terminals);
        assert!(dawg.is_terminal(dawg.root()));
    }

    #[test]
    fn distinct_substrings() {
        for haystack in ["a", "aaaa", "abab", "banana", HELLO, "abcbcabcbbca"] {
            let expected: HashSet<&[u8]> = substrings(haystack.as_bytes()).collect();
            let dawg = built(haystack);
            assert_eq!(dawg.distinct_substring_count(), expected.len() as u64, "{haystack}");
        }
    }

    #[test]
    fn longest_prefix_match() {
        let dawg = built(HELLO);
        assert_eq!(dawg.longest_prefix_match(""), 0);
        assert_eq!(dawg.longest_prefix_match("world"), 5);
        assert_eq!(dawg.longest_prefix_match("worlds"), 5);
        assert_eq!(dawg.longest_prefix_match("low"), 2);
        assert_eq!(dawg.longest_prefix_match("xyz"), 0);
    }

    #[test]
    fn walk_reaches_state_of_longest_match() {
        let dawg = built(HELLO);
        let id = dawg.walk("hello world").unwrap();
        assert_eq!(dawg.state(id).suffix_len(), HELLO.len());
        assert_eq!(dawg.walk("hello!"), None);
        assert_eq!(dawg.walk(""), Some(dawg.root()));
    }

    #[test]
    fn accessors() {
        let dawg = built(HELLO);
        assert_eq!(dawg.haystack_len(), 11);
        assert_eq!(dawg.states().len(), dawg.state_count());
        assert!(dawg.state_count() <= state_bound(11));
        assert_eq!(dawg.config(), Config::default());
        assert_eq!(
            format!("{dawg:?}"),
            format!("Dawg {{ haystack_len: 11, state_count: {} }}", dawg.state_count())
        );
    }

    #[test]
    fn dawg_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Dawg>();
    }

    #[test]
    fn shared_between_threads() {
        let dawg = built(HELLO);
        std::thread::scope(|s| {
            for needle in ["hello", "world", "o w", "nope"] {
                let dawg = &dawg;
                s.spawn(move || {
                    assert_eq!(dawg.substr(needle), occurs(HELLO.as_bytes(), needle.as_bytes()));
                });
            }
        });
    }
}
