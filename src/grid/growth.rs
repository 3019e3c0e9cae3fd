//! Capacity growth rule shared by buffers, rows and tables
//!
//! Small containers double; past [`DOUBLING_LIMIT`] elements they grow by a
//! fixed [`LINEAR_INCREMENT`] so very large tables do not over-allocate.

use std::mem::size_of;

use super::error::{GridError, Result};

/// Largest capacity that still doubles on growth
pub const DOUBLING_LIMIT: usize = 500;

/// Fixed step used once a container is past [`DOUBLING_LIMIT`]
pub const LINEAR_INCREMENT: usize = 500;

/// Next capacity after `current` (in elements)
///
/// An empty container grows to a single element.
pub fn next_capacity(current: usize) -> Result<usize> {
    let next = match current {
        0 => Some(1),
        c if c <= DOUBLING_LIMIT => c.checked_mul(2),
        c => c.checked_add(LINEAR_INCREMENT),
    };
    next.ok_or(GridError::CapacityOverflow { current })
}

/// Smallest capacity on the growth sequence from `current` that holds `needed`
pub fn capacity_for(current: usize, needed: usize) -> Result<usize> {
    let mut target = current;
    while target < needed && target <= DOUBLING_LIMIT {
        target = next_capacity(target)?;
    }
    if target >= needed {
        return Ok(target);
    }

    // Linear region: jump straight to the first step that fits
    let steps = (needed - target).div_ceil(LINEAR_INCREMENT);
    steps
        .checked_mul(LINEAR_INCREMENT)
        .and_then(|grown| target.checked_add(grown))
        .ok_or(GridError::CapacityOverflow { current })
}

/// Make sure `storage` can hold `needed` elements without reallocating
///
/// `capacity` is the logical capacity tracked by the owning container. On
/// failure neither `storage` nor `capacity` is touched.
pub(crate) fn reserve_for<T>(storage: &mut Vec<T>, capacity: &mut usize, needed: usize) -> Result<()> {
    if needed <= *capacity && storage.capacity() >= *capacity {
        return Ok(());
    }

    let target = capacity_for(*capacity, needed)?;

    // Vec rejects byte sizes past isize::MAX; report it the same way as overflow
    let fits = target
        .checked_mul(size_of::<T>().max(1))
        .is_some_and(|bytes| bytes <= isize::MAX as usize);
    if !fits {
        return Err(GridError::CapacityOverflow { current: *capacity });
    }

    let additional = target.saturating_sub(storage.len());
    if let Err(e) = storage.try_reserve_exact(additional) {
        tracing::warn!("Failed to reserve {} elements: {}", target, e);
        return Err(GridError::AllocationFailure { requested: target });
    }

    tracing::trace!("Grew storage from {} to {} elements", *capacity, target);
    *capacity = target;
    Ok(())
}

/// Grow `storage` by a single step of the growth rule
pub(crate) fn grow<T>(storage: &mut Vec<T>, capacity: &mut usize) -> Result<()> {
    let needed = capacity
        .checked_add(1)
        .ok_or(GridError::CapacityOverflow { current: *capacity })?;
    reserve_for(storage, capacity, needed)
}
