//! Task priority values.

use std::fmt;

/// A task's bid for the current tick.  Higher values win; ties are broken by
/// registration order in the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Priority(pub i32);

impl Priority {
    /// Sentinel meaning "not eligible this tick".  A task bidding `NONE` is
    /// never selected, even when nothing else is eligible.
    pub const NONE: Priority = Priority(i32::MIN);

    #[inline]
    pub fn is_eligible(self) -> bool {
        self != Priority::NONE
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_eligible() {
            write!(f, "{}", self.0)
        } else {
            write!(f, "NONE")
        }
    }
}
