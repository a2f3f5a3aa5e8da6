//! Strongly-typed identifiers.

use std::fmt;

/// Identifies a material by its position in the scenario's material list.
///
/// `MaterialId(n)` refers to the n-th material. The sentinel
/// [`MaterialId::NONE`] (`-1`) marks a cell with no assigned material;
/// such cells behave as vacuum and take no part in diffusion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(pub i32);

impl MaterialId {
    /// The "no material" sentinel.
    pub const NONE: MaterialId = MaterialId(-1);

    /// Whether this is the sentinel value.
    pub fn is_none(self) -> bool {
        self.0 < 0
    }

    /// Index into a material list, or `None` for the sentinel.
    ///
    /// Does not check the upper bound; callers compare against the
    /// list length themselves.
    pub fn index(self) -> Option<usize> {
        usize::try_from(self.0).ok()
    }
}

impl Default for MaterialId {
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Display for MaterialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            write!(f, "none")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl From<i32> for MaterialId {
    fn from(v: i32) -> Self {
        Self(v)
    }
}

/// Monotonically increasing step counter.
///
/// `StepId(0)` is the initial state; each completed step increments it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StepId(pub u64);

impl StepId {
    /// The step after this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for StepId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
