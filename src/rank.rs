//! Rank type and helpers for Fibonacci heap trees.
//!
//! The rank of a node is the number of occupied child slots it has. With
//! cascading cuts in place, a node of rank `k` roots a subtree of at least
//! `F(k + 2)` nodes (the Fibonacci numbers), so the largest rank in a heap of
//! `n` elements is below `log_φ(n) + 1`. For any `n` that fits in memory that
//! is well under 100, so `u8` is plenty and keeps nodes compact.

/// Type alias for node rank.
pub type Rank = u8;

/// Maximum representable rank.
pub const MAX_RANK: Rank = u8::MAX;

/// Increment a rank after a node adopts a child.
///
/// # Panics
///
/// Panics if `rank == MAX_RANK`. Reaching it would require more than
/// `F(257)` elements, so this only fires on a corrupted heap.
///
/// # Example
///
/// ```rust
/// use rust_fibonacci_heap::rank::{checked_increment, Rank};
///
/// let rank: Rank = 5;
/// assert_eq!(checked_increment(rank), 6);
/// ```
#[inline]
pub fn checked_increment(rank: Rank) -> Rank {
    rank.checked_add(1)
        .expect("rank overflow: a Fibonacci heap rank is bounded by log_phi(n) + 1")
}

/// Decrement a rank after a node loses a child.
///
/// Saturates at zero; the validator recomputes ranks from the slot array and
/// reports any drift.
///
/// ```rust
/// use rust_fibonacci_heap::rank::saturating_decrement;
///
/// assert_eq!(saturating_decrement(3), 2);
/// assert_eq!(saturating_decrement(0), 0);
/// ```
#[inline]
pub fn saturating_decrement(rank: Rank) -> Rank {
    rank.saturating_sub(1)
}

/// Number of consolidation buckets needed when the highest rank seen so far
/// is `max_rank`: one per rank plus one spare for the first link beyond it.
#[inline]
pub fn bucket_count(max_rank: Rank) -> usize {
    usize::from(max_rank) + 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_increment() {
        assert_eq!(checked_increment(0), 1);
        assert_eq!(checked_increment(254), 255);
    }

    #[test]
    #[should_panic(expected = "rank overflow")]
    fn test_checked_increment_overflow() {
        checked_increment(MAX_RANK);
    }

    #[test]
    fn test_saturating_decrement() {
        assert_eq!(saturating_decrement(1), 0);
        assert_eq!(saturating_decrement(0), 0);
    }

    #[test]
    fn test_bucket_count_leaves_room_for_one_link() {
        assert_eq!(bucket_count(0), 2);
        assert_eq!(bucket_count(7), 9);
        assert_eq!(bucket_count(MAX_RANK), 257);
    }
}
