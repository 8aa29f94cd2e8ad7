//! Error types for this crate.

use std::collections::TryReserveError;
use std::fmt;

/// Result type alias for fallible operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// An error produced while building or querying a [`Matcher`](crate::Matcher).
#[derive(Debug)]
pub enum Error {
    /// Growing the node table or a node's match list failed.
    Alloc(TryReserveError),

    /// A pattern with an empty `value` was supplied. Zero-length patterns
    /// are not supported by the leftmost-longest algorithm.
    EmptyPattern,

    /// The compiled automaton needed more states than the chosen [`NodeId`]
    /// representation (`crate::NodeId`) can address. Retry construction
    /// with a wider node id type (e.g. `u16`/`u32`/`u64`/`usize`).
    NodeSpaceExhausted,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Alloc(err) => write!(f, "allocation failure while building automaton: {err}"),
            Error::EmptyPattern => write!(f, "patterns must be non-empty"),
            Error::NodeSpaceExhausted => write!(
                f,
                "pattern set compiles to more states than the chosen node id type can address"
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Alloc(err) => Some(err),
            Error::EmptyPattern | Error::NodeSpaceExhausted => None,
        }
    }
}

impl From<TryReserveError> for Error {
    fn from(err: TryReserveError) -> Self {
        Error::Alloc(err)
    }
}
