use core::fmt;
use core::num::NonZeroU32;

use crate::error::{CoreError, CoreResult};

/// Compact identifier for regions and nodes.
///
/// - `u32` keeps the global index arena small
/// - `NonZero` lets `Option<Id>` serve as the "unmapped" sentinel at no cost
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(NonZeroU32);

impl Id {
    /// Largest 0-based index representable by an `Id`.
    pub const MAX_INDEX: u32 = u32::MAX - 1;

    /// Create an Id from a 0-based index by storing index+1.
    pub fn from_index(index: u32) -> Self {
        // index+1 must be nonzero
        Self(NonZeroU32::new(index + 1).expect("index+1 is nonzero"))
    }

    /// Create an Id from an untrusted integer coming out of an archive.
    ///
    /// Negative values and values past [`Id::MAX_INDEX`] are rejected.
    pub fn try_from_raw(value: i64, what: &'static str) -> CoreResult<Self> {
        if value < 0 || value > i64::from(Self::MAX_INDEX) {
            return Err(CoreError::InvalidId { what, value });
        }
        Ok(Self::from_index(value as u32))
    }

    /// Recover the 0-based index.
    pub fn index(self) -> u32 {
        self.0.get() - 1
    }

    /// The 0-based index as a `usize`, for array addressing.
    pub fn slot(self) -> usize {
        self.index() as usize
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.index())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Domain-specific ID aliases for clarity (no runtime cost).
pub type RegionId = Id;
/// Region-scoped, zero-based node id.
pub type LocalId = Id;
/// Archive-assigned node id, unique across the whole archive.
pub type GlobalId = Id;
