//! Request identifier generation
//!
//! Ids pack a fixed member prefix with a millisecond timestamp and an
//! incrementing counter, so ids from one generator are strictly increasing
//! and ids from distinct members (or distinct start times) do not collide.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Bits occupied by the time/sequence suffix (the member prefix fills the rest).
const SUFFIX_BITS: u32 = 48;

/// Mask selecting the 48-bit suffix of an id.
const SUFFIX_MASK: u64 = u64::MAX >> 16;

/// Mask selecting the millisecond component before the counter byte is appended.
const MILLIS_MASK: u64 = u64::MAX >> 24;

/// Generates request ids for a single applier instance.
///
/// Layout: `member_id << 48 | millis (40 bits) << 8 | counter (8 bits)`.
/// The counter carries into the millisecond bits on overflow, which keeps
/// consecutive ids strictly increasing until the whole 48-bit suffix wraps.
#[derive(Debug)]
pub struct IdGenerator {
    prefix: u64,
    suffix: AtomicU64,
}

impl IdGenerator {
    /// Create a generator from a member id and a timestamp taken as a
    /// duration since the Unix epoch.
    pub fn new(member_id: u64, since_epoch: Duration) -> Self {
        let millis = since_epoch.as_millis() as u64;
        Self {
            prefix: member_id << SUFFIX_BITS,
            suffix: AtomicU64::new((millis & MILLIS_MASK) << 8),
        }
    }

    /// Return the next id.
    ///
    /// The increment and the read are a single fetch-and-add, so concurrent
    /// callers can never observe the same suffix.
    pub fn next(&self) -> u64 {
        let suffix = self.suffix.fetch_add(1, Ordering::Relaxed);
        self.prefix | (suffix & SUFFIX_MASK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_layout() {
        let generator = IdGenerator::new(0x12, Duration::from_millis(0x3456));
        let id = generator.next();
        assert_eq!(id, 0x12000000345600);
        for i in 0..1000u64 {
            assert_eq!(generator.next(), id + i + 1);
        }
    }

    #[test]
    fn test_consecutive_ids_differ_by_one() {
        let generator = IdGenerator::new(7, Duration::from_millis(123_456_789));
        let first = generator.next();
        assert_eq!(generator.next(), first + 1);
    }

    #[test]
    fn test_distinct_members_distinct_ids() {
        let gen0 = IdGenerator::new(0, Duration::from_millis(100));
        let gen1 = IdGenerator::new(1, Duration::from_millis(100));
        assert_ne!(gen0.next(), gen1.next());
    }

    #[test]
    fn test_distinct_start_times_distinct_ids() {
        let gen0 = IdGenerator::new(0, Duration::from_millis(100));
        let restarted = IdGenerator::new(0, Duration::from_millis(101));
        assert_ne!(gen0.next(), restarted.next());
    }

    #[test]
    fn test_concurrent_next_is_unique() {
        use std::collections::HashSet;
        use std::sync::Arc;

        let generator = Arc::new(IdGenerator::new(1, Duration::from_millis(1)));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let generator = Arc::clone(&generator);
            handles.push(std::thread::spawn(move || {
                (0..1000).map(|_| generator.next()).collect::<Vec<_>>()
            }));
        }

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().expect("generator thread panicked") {
                assert!(seen.insert(id), "duplicate id {id:#x}");
            }
        }
    }
}
