/// Online construction of the automaton.
pub mod builder;
/// Outgoing edges and the state type.
pub mod children;
/// Build-time options.
pub mod config;
/// The frozen automaton and its queries.
pub mod automaton;
/// Index arena holding the states during construction.
pub(crate) mod state_arena;

pub use automaton::Dawg;
pub use builder::{build_dawg, Builder, BuilderError};
pub use children::{ChildIter, State};
pub use config::Config;
pub use state_arena::StateId;
