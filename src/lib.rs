//! Multi-pattern byte-string search over a compiled Aho-Corasick automaton,
//! with leftmost-longest match semantics: among patterns that could begin
//! at the earliest matching position, the longest one wins; ties between
//! equal-length patterns are broken by insertion order.
//!
//! ```
//! use acfind::{Algorithm, Config, Matcher, Pattern};
//!
//! let patterns = vec![
//!     Pattern::new(0, b"bc".to_vec()),
//!     Pattern::new(1, b"ghi".to_vec()),
//! ];
//! let matcher: Matcher = Matcher::new(Config {
//!     algorithm: Algorithm::AhoCorasickLeftmost,
//!     patterns: &patterns,
//! })
//! .unwrap();
//!
//! let loc = matcher.next(b"abc def ghi", 0).unwrap();
//! assert_eq!(loc.matched().id(), 0);
//! assert_eq!(loc.end(), 3);
//! ```

mod automaton;
mod error;
mod node;
mod state_id;
mod trainer;

pub use error::{Error, Result};
pub use state_id::NodeId;

use automaton::Automaton;

/// A pattern to search for: a caller-supplied opaque `id` plus the bytes to
/// match. Patterns must be non-empty; duplicate byte sequences with
/// distinct ids are permitted (the earliest-declared wins ties).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pattern {
    id: usize,
    value: Vec<u8>,
}

impl Pattern {
    /// Creates a new pattern. `value` must be non-empty; this is only
    /// checked when the pattern is actually used to build a [`Matcher`].
    pub fn new(id: usize, value: Vec<u8>) -> Self {
        Pattern { id, value }
    }

    /// The caller-supplied identifier, returned unchanged with every match.
    #[inline]
    pub fn id(&self) -> usize {
        self.id
    }

    /// The bytes to search for.
    #[inline]
    pub fn value(&self) -> &[u8] {
        &self.value
    }
}

/// A compile-time result: which pattern matched, and how long it is.
///
/// The starting position of a match is not stored here; it is derived at
/// search time as `end - len` (see [`Location::beginning`]).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Match {
    id: usize,
    len: usize,
}

impl Match {
    /// The identifier of the pattern that matched.
    #[inline]
    pub fn id(&self) -> usize {
        self.id
    }

    /// The byte length of the pattern that matched.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }
}

/// A runtime hit: a [`Match`] plus the exclusive end offset in the searched
/// text it was found in.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Location {
    m: Match,
    end: usize,
}

impl Location {
    /// The match this location reports.
    #[inline]
    pub fn matched(&self) -> Match {
        self.m
    }

    /// The exclusive end offset of the match in the searched text.
    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    /// The inclusive start offset of the match in the searched text.
    /// Always equal to `end() - matched().len()`.
    #[inline]
    pub fn beginning(&self) -> usize {
        self.end - self.m.len
    }
}

/// The matching algorithm to compile patterns with.
///
/// Only one variant exists today, but this is kept as a closed, marked
/// `#[non_exhaustive]` sum type so that future variants (standard
/// leftmost-first, overlapping matches) can be added without changing
/// [`Matcher`]'s shape.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Algorithm {
    /// Leftmost-longest multi-pattern matching over an Aho-Corasick
    /// automaton. See the crate documentation for the exact semantics.
    AhoCorasickLeftmost,
}

/// Construction parameters for a [`Matcher`].
pub struct Config<'p> {
    pub algorithm: Algorithm,
    pub patterns: &'p [Pattern],
}

/// A compiled automaton, ready to answer `next`/`all`/`starts` queries.
///
/// `S` is the node-id representation; it defaults to `u32`, which comfortably
/// covers pattern sets compiling to up to ~4 billion states. Pick a narrower
/// type (`u8`/`u16`) to shrink memory for small pattern sets, or `u64`/`usize`
/// for larger ones than `u32` can address. This choice has no effect on
/// matching behavior.
///
/// A `Matcher` is immutable after construction and safe to share across
/// threads (`Send + Sync` whenever `S` is).
#[derive(Debug)]
pub struct Matcher<S: NodeId = u32> {
    automaton: Automaton<S>,
}

impl<S: NodeId> Matcher<S> {
    /// Compiles `config.patterns` into an automaton using `config.algorithm`.
    ///
    /// Returns [`Error::EmptyPattern`] if any pattern has an empty `value`,
    /// [`Error::Alloc`] if growing the node table failed, or
    /// [`Error::NodeSpaceExhausted`] if the compiled automaton needs more
    /// states than `S` can address (retry with a wider [`NodeId`]).
    pub fn new(config: Config<'_>) -> Result<Self> {
        match config.algorithm {
            Algorithm::AhoCorasickLeftmost => {
                let nodes = trainer::train(config.patterns)?;
                Ok(Matcher {
                    automaton: Automaton::new(nodes),
                })
            }
        }
    }

    /// Returns the leftmost-longest match whose beginning is `>= at`, or
    /// `None` if there is none.
    ///
    /// `at` must satisfy `0 <= at <= text.len()`; `at == text.len()` is
    /// legal and always yields `None`.
    pub fn next(&self, text: &[u8], at: usize) -> Option<Location> {
        self.automaton.find(text, at)
    }

    /// Returns every non-overlapping leftmost-longest match from `at`
    /// forward, in order.
    ///
    /// Returns [`Error::Alloc`] if the result buffer could not be grown.
    pub fn all(&self, text: &[u8], at: usize) -> Result<Vec<Location>> {
        let mut out: Vec<Location> = Vec::new();
        let mut pos = at;
        loop {
            let loc = match self.automaton.find(text, pos) {
                Some(loc) => loc,
                None => break,
            };
            out.try_reserve(1).map_err(Error::from)?;
            out.push(loc);
            pos = std::cmp::max(loc.end, pos + 1);
            if pos >= text.len() {
                break;
            }
        }
        Ok(out)
    }

    /// Returns the match beginning exactly at `at`, if any.
    ///
    /// Equivalent to `next(text, at)` filtered to locations whose
    /// `beginning() == at`.
    pub fn starts(&self, text: &[u8], at: usize) -> Option<Match> {
        let loc = self.next(text, at)?;
        if loc.beginning() == at {
            Some(loc.m)
        } else {
            None
        }
    }
}
