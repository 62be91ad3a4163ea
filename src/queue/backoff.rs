//! Backoff schedule for re-queued work items.

use std::time::Duration;

use rand::Rng;

/// Delay before an item's first retry.
const BASE_DELAY_MS: u64 = 5;
/// Ceiling on any single delay; a persistently failing item never parks
/// longer than this between attempts.
const MAX_DELAY_MS: u64 = 1_000_000;

/// Delay before an item's next attempt, given how often it was requeued.
///
/// Doubles per requeue from `BASE_DELAY_MS` up to `MAX_DELAY_MS`, then adds
/// up to 10% jitter so a burst of items failing together does not re-arrive
/// in lockstep.
pub fn requeue_delay(attempt: u32) -> Duration {
    if attempt == 0 {
        return Duration::ZERO;
    }

    let doublings = (attempt - 1).min(63);
    let delay_ms = BASE_DELAY_MS.saturating_mul(1 << doublings).min(MAX_DELAY_MS);

    let jitter_ms = match delay_ms / 10 {
        0 => 0,
        range => rand::thread_rng().gen_range(0..range),
    };

    Duration::from_millis(delay_ms + jitter_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_requeues_is_immediate() {
        assert_eq!(requeue_delay(0), Duration::ZERO);
    }

    #[test]
    fn test_delay_doubles_per_requeue() {
        // below 10ms the jitter range is empty, so these are exact
        assert_eq!(requeue_delay(1), Duration::from_millis(BASE_DELAY_MS));

        // 5ms << 3 = 40ms, plus at most 4ms jitter
        let d4 = requeue_delay(4);
        assert!(d4 >= Duration::from_millis(40));
        assert!(d4 < Duration::from_millis(44));
    }

    #[test]
    fn test_delay_never_exceeds_ceiling_plus_jitter() {
        // far past the ceiling; the shift saturates instead of overflowing
        let d = requeue_delay(200);
        assert!(d >= Duration::from_millis(MAX_DELAY_MS));
        assert!(d <= Duration::from_millis(MAX_DELAY_MS + MAX_DELAY_MS / 10));
    }
}
