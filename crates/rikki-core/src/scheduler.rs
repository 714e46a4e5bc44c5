//! Timing and choice source for scripted replies
//!
//! The session asks a [`ReplyScheduler`] how long to "type" and which canned
//! response to use. Production code uses [`SeededScheduler`]; tests can swap in
//! a fixed implementation to pin both values.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;
use std::time::Duration;

pub const DEFAULT_MIN_DELAY: Duration = Duration::from_millis(1500);
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_millis(2500);

pub trait ReplyScheduler: Send {
    /// Delay before the next scripted reply is delivered
    fn next_delay(&mut self) -> Duration;

    /// Index into a response set of `len` entries. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

/// Uniform random delay and choice, reproducible when seeded
pub struct SeededScheduler {
    rng: StdRng,
    delay_ms: RangeInclusive<u64>,
}

impl SeededScheduler {
    pub fn new(seed: Option<u64>, min: Duration, max: Duration) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let (lo, hi) = (min.as_millis() as u64, max.as_millis() as u64);
        Self {
            rng,
            delay_ms: lo.min(hi)..=lo.max(hi),
        }
    }

    pub fn with_defaults(seed: Option<u64>) -> Self {
        Self::new(seed, DEFAULT_MIN_DELAY, DEFAULT_MAX_DELAY)
    }
}

impl ReplyScheduler for SeededScheduler {
    fn next_delay(&mut self) -> Duration {
        Duration::from_millis(self.rng.random_range(self.delay_ms.clone()))
    }

    fn pick(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len.max(1))
    }
}

/// Always the same delay and index; used where determinism matters more than variety
#[derive(Debug, Clone, Copy)]
pub struct FixedScheduler {
    pub delay: Duration,
    pub index: usize,
}

impl ReplyScheduler for FixedScheduler {
    fn next_delay(&mut self) -> Duration {
        self.delay
    }

    fn pick(&mut self, len: usize) -> usize {
        self.index % len.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_picks_are_reproducible() {
        let mut a = SeededScheduler::with_defaults(Some(42));
        let mut b = SeededScheduler::with_defaults(Some(42));
        let picks_a: Vec<usize> = (0..20).map(|_| a.pick(5)).collect();
        let picks_b: Vec<usize> = (0..20).map(|_| b.pick(5)).collect();
        assert_eq!(picks_a, picks_b);
        assert!(picks_a.iter().all(|i| *i < 5));
    }

    #[test]
    fn test_delay_stays_in_range() {
        let mut scheduler = SeededScheduler::with_defaults(Some(7));
        for _ in 0..100 {
            let delay = scheduler.next_delay();
            assert!(delay >= DEFAULT_MIN_DELAY && delay <= DEFAULT_MAX_DELAY);
        }
    }

    #[test]
    fn test_equal_bounds_give_fixed_delay() {
        let mut scheduler = SeededScheduler::new(
            Some(1),
            Duration::from_millis(10),
            Duration::from_millis(10),
        );
        assert_eq!(scheduler.next_delay(), Duration::from_millis(10));
    }

    #[test]
    fn test_fixed_scheduler_wraps_index() {
        let mut fixed = FixedScheduler {
            delay: Duration::ZERO,
            index: 7,
        };
        assert_eq!(fixed.pick(5), 2);
    }
}
