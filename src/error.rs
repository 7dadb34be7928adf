//! Error types shared by the containers and the ledger.

use std::fmt;

use thiserror::Error;

/// Result type for container and ledger operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised eagerly by positional accessors and list transforms.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A position, count or window outside the currently valid range
    #[error("{container}: {bound}")]
    OutOfRange {
        container: &'static str,
        bound: Bound,
    },
}

/// Which bound an out-of-range request violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// Element position
    Position(usize),
    /// Element count passed to `take`, `drop` or `split_front`
    Count { op: &'static str, count: usize },
    /// `mid(start, count)` window
    Window { start: usize, count: usize },
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Position(pos) => write!(f, "invalid position: {pos}"),
            Bound::Count { op, count } => {
                write!(f, "invalid number of elements to {op}: {count}")
            }
            Bound::Window { start, count } => write!(f, "mid({start},{count}) invalid"),
        }
    }
}

impl Error {
    pub(crate) fn out_of_range(container: &'static str, position: usize) -> Self {
        Error::OutOfRange {
            container,
            bound: Bound::Position(position),
        }
    }

    pub(crate) fn invalid_count(container: &'static str, op: &'static str, count: usize) -> Self {
        Error::OutOfRange {
            container,
            bound: Bound::Count { op, count },
        }
    }

    pub(crate) fn invalid_window(container: &'static str, start: usize, count: usize) -> Self {
        Error::OutOfRange {
            container,
            bound: Bound::Window { start, count },
        }
    }
}
