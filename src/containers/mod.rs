//! Generic value-semantics containers used by the ledger.

pub mod buffer;
pub mod linked;
pub mod sequence;

use std::fmt;

pub use buffer::DynamicBuffer;
pub use linked::{CursorMut, Iter, LinkedSequence};
pub use sequence::SequenceList;

/// Shared `[ a b c ]` rendering for every container.
pub(crate) fn write_bracketed<'a, T, I>(f: &mut fmt::Formatter<'_>, items: I) -> fmt::Result
where
    T: fmt::Display + 'a,
    I: IntoIterator<Item = &'a T>,
{
    write!(f, "[ ")?;
    for item in items {
        write!(f, "{item} ")?;
    }
    write!(f, "]")
}
