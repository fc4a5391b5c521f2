//! Error type for malformed externally-supplied clocks and contexts.
//!
//! Every operation in this crate succeeds on well-formed inputs. Errors only
//! arise when data crossing the crate boundary — a causal context handed to
//! [`DvvSet::with_context`](crate::DvvSet::with_context), or a clock
//! deserialized by a storage layer — violates the structural invariants the
//! algorithms rely on.

use core::fmt;

/// Error raised when an input clock or context is malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DvvError {
    /// A causal context or entry list is out of sort order, or repeats a
    /// replica id, at the given position.
    InvalidContext {
        /// Index of the offending element.
        index: usize,
    },
    /// An entry's value window is longer than its write counter, which
    /// would make the merge truncation length invalid.
    InvariantViolation {
        /// The entry's write counter.
        counter: u64,
        /// The entry's value window length.
        window: usize,
    },
}

impl fmt::Display for DvvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidContext { index } => {
                write!(f, "causal context out of order or duplicated at index {index}")
            }
            Self::InvariantViolation { counter, window } => {
                write!(
                    f,
                    "entry value window ({window}) exceeds its write counter ({counter})"
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DvvError {}
