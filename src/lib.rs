//! # suffix-dawg
//!
//! A suffix automaton, or [DAWG](https://en.wikipedia.org/wiki/Suffix_automaton)
//! (Directed Acyclic Word Graph), over a fixed byte string.
//!
//! The automaton is built once from a *haystack* and then answers, for any
//! *needle*, whether the needle is a substring of the haystack and whether it is
//! a suffix of it, in time linear in the needle's length. Construction follows
//! the online algorithm of [Blumer et al. (1985)](https://doi.org/10.1016/0304-3975(85)90157-4):
//! one pass over the haystack, at most `2n - 1` states.
//!
//! ## Features
//!
//! - **Byte alphabet**: all 256 byte values, including `0` and non-ASCII bytes
//! - **Compact**: edges are stored inline until a state has more than a handful
//! - **Fast**: O(needle length) queries over an index-addressed state array
//! - **Thread-safe**: a built [`Dawg`](dawg::Dawg) is immutable and `Send + Sync`
//!
//! ## Quick Start
//!
//! ```
//! use suffix_dawg::dawg::{build_dawg, Config};
//!
//! let dawg = build_dawg("hello world", Config::default()).unwrap();
//!
//! assert!(dawg.substr("lo wor"));
//! assert!(!dawg.substr("HELLO"));
//! assert!(dawg.suffix("world"));
//! assert!(!dawg.suffix("hello"));
//! ```
//!
//! The haystack can also be fed byte by byte:
//!
//! ```
//! use suffix_dawg::dawg::{Builder, Config};
//!
//! let mut builder = Builder::new();
//! for &byte in b"banana" {
//!     builder.push(byte);
//! }
//! let dawg = builder.build(Config::new().with_early_exit(true)).unwrap();
//!
//! assert!(dawg.suffix("ana"));
//! assert!(!dawg.substr("bananas"));
//! assert_eq!(dawg.distinct_substring_count(), 15);
//! ```
//!
//! ## Walking the graph
//!
//! States are addressed by [`StateId`](dawg::StateId) and can be inspected
//! directly:
//!
//! ```
//! use suffix_dawg::dawg::{build_dawg, Config};
//!
//! let dawg = build_dawg("abb", Config::default()).unwrap();
//! let end = dawg.walk("bb").unwrap();
//!
//! assert!(dawg.is_terminal(end));
//! assert_eq!(dawg.state(end).suffix_len(), 3);
//! assert_eq!(dawg.state(dawg.root()).transitions().count(), 2);
//! ```

#![warn(missing_docs)]

/// Core automaton: states, builder, and queries.
pub mod dawg;
