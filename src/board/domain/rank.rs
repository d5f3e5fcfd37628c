//! Validated rank scalar for intra-column task ordering.

use super::BoardDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Zero-based position of a task within its column.
///
/// Ranks order tasks sharing one status. At any settled state a column's
/// ranks form the contiguous set `{0, 1, ..., n-1}`; the value carries no
/// meaning across columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rank(u32);

impl Rank {
    /// The first position in a column.
    pub const ZERO: Self = Self(0);

    /// Largest rank representable in the current `PostgreSQL` schema.
    const MAX_PERSISTED_VALUE: u64 = i32::MAX as u64;

    /// Creates a validated rank.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::InvalidRank`] when the value exceeds the
    /// schema-backed maximum (`i32::MAX`).
    pub fn new(value: u64) -> Result<Self, BoardDomainError> {
        if value > Self::MAX_PERSISTED_VALUE {
            return Err(BoardDomainError::InvalidRank(value));
        }
        u32::try_from(value)
            .map(Self)
            .map_err(|_| BoardDomainError::InvalidRank(value))
    }

    /// Creates a rank from a zero-based sequence index.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::InvalidRank`] when the index exceeds the
    /// schema-backed maximum.
    pub fn from_index(index: usize) -> Result<Self, BoardDomainError> {
        let value = u64::try_from(index)
            .map_err(|_| BoardDomainError::InvalidRank(u64::MAX))?;
        Self::new(value)
    }

    /// Creates a rank from a zero-based sequence index, saturating at the
    /// schema-backed maximum.
    ///
    /// Display paths use this; persistence paths validate through
    /// [`Rank::from_index`] instead.
    #[must_use]
    pub fn clamped_from_index(index: usize) -> Self {
        Self::from_index(index).unwrap_or(Self(i32::MAX as u32))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Returns the rank as a zero-based sequence index.
    #[must_use]
    pub fn index(self) -> usize {
        usize::try_from(self.0).unwrap_or(usize::MAX)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
