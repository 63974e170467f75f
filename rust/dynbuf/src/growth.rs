//! Capacity arithmetic for growing the backing region.

use dynbuf_common::{Result, error::Error};

/// Largest backing region the buffer will ever request, in bytes.
///
/// Allocations are bounded by `isize::MAX`, so anything above it is reported as
/// an overflow rather than handed to the allocator.
pub const MAX_CAPACITY: usize = isize::MAX as usize;

/// Returns `length + additional`, the capacity required to hold `additional`
/// more bytes after `length` already written ones.
///
/// Fails with `CapacityOverflow` if the sum exceeds [`MAX_CAPACITY`].
#[inline]
pub fn required_capacity(length: usize, additional: usize) -> Result<usize> {
    length
        .checked_add(additional)
        .filter(|&needed| needed <= MAX_CAPACITY)
        .ok_or_else(|| Error::capacity_overflow(length, additional))
}

/// Computes the capacity of a grown region: `floor(needed * growth_factor)`.
///
/// The result is never below `needed` and never above [`MAX_CAPACITY`]. The
/// caller must pass `needed <= MAX_CAPACITY`.
#[inline]
pub fn grown_capacity(needed: usize, growth_factor: f64) -> usize {
    debug_assert!(needed <= MAX_CAPACITY);
    let grown = (needed as f64 * growth_factor).floor();
    if grown >= MAX_CAPACITY as f64 {
        MAX_CAPACITY
    } else {
        // `as` saturates at zero for negative or NaN products.
        (grown as usize).max(needed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_capacity() {
        assert_eq!(required_capacity(0, 0).unwrap(), 0);
        assert_eq!(required_capacity(512, 1).unwrap(), 513);
        assert!(required_capacity(usize::MAX, 1).is_err());
        assert!(required_capacity(MAX_CAPACITY, 1).is_err());
        assert_eq!(required_capacity(MAX_CAPACITY - 1, 1).unwrap(), MAX_CAPACITY);
    }

    #[test]
    fn test_grown_capacity_default_factor() {
        assert_eq!(grown_capacity(513, 2.0), 1026);
        assert_eq!(grown_capacity(1, 2.0), 2);
        assert_eq!(grown_capacity(0, 2.0), 0);
    }

    #[test]
    fn test_grown_capacity_floors_product() {
        assert_eq!(grown_capacity(3, 1.5), 4);
        assert_eq!(grown_capacity(7, 1.25), 8);
    }

    #[test]
    fn test_grown_capacity_never_below_needed() {
        assert_eq!(grown_capacity(1, 1.1), 1);
        assert_eq!(grown_capacity(9, 1.01), 9);
        for needed in 0..1000 {
            assert!(grown_capacity(needed, 1.001) >= needed);
        }
    }

    #[test]
    fn test_grown_capacity_clamps_to_max() {
        assert_eq!(grown_capacity(MAX_CAPACITY / 2 + 1, 2.0), MAX_CAPACITY);
        assert_eq!(grown_capacity(MAX_CAPACITY, 3.0), MAX_CAPACITY);
    }
}
