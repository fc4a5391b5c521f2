//! Convenient re-exports for common usage.
//!
//! ```
//! use dvv_kit::prelude::*;
//! ```

pub use crate::Dot;
pub use crate::DvvError;
pub use crate::DvvSet;
pub use crate::Entry;
