/// Options fixed when an automaton is built.
///
/// The defaults give plain traversal with no shortcuts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Reject needles longer than the automaton's state count without walking.
    ///
    /// No walk can be longer than the haystack, and the state count always
    /// exceeds the haystack length, so this never changes a query's result.
    pub early_exit: bool,
}

impl Config {
    /// Creates the default configuration.
    pub const fn new() -> Self {
        Config { early_exit: false }
    }

    /// Sets [`early_exit`](Config::early_exit).
    pub const fn with_early_exit(mut self, early_exit: bool) -> Self {
        self.early_exit = early_exit;
        self
    }
}
