//! Error type for the grid storage engine

use thiserror::Error;

/// Failure of a grid operation
///
/// Every variant is reported before the table is mutated, so the caller
/// always observes the table in its pre-call state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Backing storage for `requested` elements could not be reserved
    #[error("memory allocation failed (requested {requested} elements)")]
    AllocationFailure { requested: usize },

    /// Growing from `current` elements would overflow the address space
    #[error("capacity overflow while growing from {current} elements")]
    CapacityOverflow { current: usize },

    /// A 1-based position fell outside `1..=max`
    #[error("position {position} is out of range (expected 1..={max})")]
    OutOfRange { position: usize, max: usize },
}

impl GridError {
    /// True for the allocation class of failures (including overflow)
    pub fn is_allocation_failure(&self) -> bool {
        matches!(
            self,
            GridError::AllocationFailure { .. } | GridError::CapacityOverflow { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, GridError>;
