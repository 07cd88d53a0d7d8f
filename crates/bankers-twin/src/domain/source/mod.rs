//! Bounded Nondeterministic Value Sources
//!
//! # Architecture
//!
//! Every input a scenario needs (initial matrices, which process asks, how
//! much it asks for) is drawn through one call: `choose_int(low, high)`.
//! The engine must be correct for *every* value in the closed range, so the
//! same scenario code can be driven by:
//!
//! ```text
//! ValueSource
//! ├─ ScriptedSource    fixed literal vector (unit tests, CLI replays)
//! ├─ ExhaustiveSource  depth-first enumeration of every choice path
//! └─ KaniSource        kani::any() + kani::assume  (cfg(kani))
//! ```

pub mod exhaustive;
pub mod scripted;

#[cfg(kani)]
pub mod kani_source;

use crate::domain::error::BankerError;
use crate::domain::resources::Units;

// Re-exports
pub use exhaustive::ExhaustiveSource;
pub use scripted::ScriptedSource;

#[cfg(kani)]
pub use kani_source::KaniSource;

/// Supplier of bounded integers
pub trait ValueSource {
    /// Produce some value in `[low, high]`
    ///
    /// # Errors
    ///
    /// - `InvalidRange` if `low > high`
    /// - Source-specific `Usage` errors (e.g. a script ran out)
    fn choose_int(&mut self, low: Units, high: Units) -> Result<Units, BankerError>;
}

impl<S: ValueSource + ?Sized> ValueSource for &mut S {
    #[inline]
    fn choose_int(&mut self, low: Units, high: Units) -> Result<Units, BankerError> {
        (**self).choose_int(low, high)
    }
}

/// Reject an empty range
#[inline]
pub(crate) fn check_range(low: Units, high: Units) -> Result<(), BankerError> {
    if low > high {
        Err(BankerError::InvalidRange { low, high })
    } else {
        Ok(())
    }
}
