//! Retry policy
//!
//! Classified retry with exponential backoff. The policy itself is plain data;
//! the loop that applies it lives in [`crate::client`], because a retry there
//! also has to tear down and re-establish the connection.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DirectoryError, Result};

/// Default number of attempts per operation.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
/// Default delay before the second attempt.
pub const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_millis(500);
/// Default upper bound for any single delay.
pub const DEFAULT_MAX_BACKOFF: Duration = Duration::from_millis(5000);

/// How wire calls are retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// When `false`, exactly one attempt is made.
    pub enabled: bool,
    /// Total attempts including the first one.
    pub max_attempts: u32,
    /// Delay after the first failed attempt.
    pub initial_backoff: Duration,
    /// Cap applied to every delay.
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_backoff: DEFAULT_INITIAL_BACKOFF,
            max_backoff: DEFAULT_MAX_BACKOFF,
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Number of attempts an operation gets under this policy.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        if self.enabled {
            self.max_attempts.max(1)
        } else {
            1
        }
    }

    /// Delay to sleep after failed attempt `attempt` (1-based).
    ///
    /// `min(initial * 2^(attempt-1), max)`: 100ms, 200ms, 400ms, ... for an
    /// initial delay of 100ms.
    #[must_use]
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31); // Prevent 2^exponent from overflowing
        let initial_ms = u64::try_from(self.initial_backoff.as_millis()).unwrap_or(u64::MAX);
        let max_ms = u64::try_from(self.max_backoff.as_millis()).unwrap_or(u64::MAX);
        let delay_ms = initial_ms.saturating_mul(1_u64 << exponent).min(max_ms);
        Duration::from_millis(delay_ms)
    }

    /// Reject policies that cannot be applied.
    pub fn validate(&self) -> Result<()> {
        if self.enabled && self.max_attempts == 0 {
            return Err(DirectoryError::InvalidInput(
                "retry max_attempts must be at least 1".to_string(),
            ));
        }
        if self.initial_backoff > self.max_backoff {
            return Err(DirectoryError::InvalidInput(format!(
                "retry initial backoff ({}ms) exceeds max backoff ({}ms)",
                self.initial_backoff.as_millis(),
                self.max_backoff.as_millis()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(initial_ms: u64, max_ms: u64) -> RetryPolicy {
        RetryPolicy {
            enabled: true,
            max_attempts: 10,
            initial_backoff: Duration::from_millis(initial_ms),
            max_backoff: Duration::from_millis(max_ms),
        }
    }

    // ---- backoff ----

    #[test]
    fn backoff_doubles_from_initial() {
        let p = policy(100, 10_000);
        assert_eq!(p.backoff(1), Duration::from_millis(100));
        assert_eq!(p.backoff(2), Duration::from_millis(200));
        assert_eq!(p.backoff(3), Duration::from_millis(400));
        assert_eq!(p.backoff(4), Duration::from_millis(800));
    }

    #[test]
    fn backoff_capped_at_max() {
        let p = policy(500, 5000);
        assert_eq!(p.backoff(4), Duration::from_millis(4000));
        assert_eq!(p.backoff(5), Duration::from_millis(5000));
        assert_eq!(p.backoff(40), Duration::from_millis(5000));
    }

    #[test]
    fn backoff_sequence_non_decreasing_and_bounded() {
        let p = policy(300, 7000);
        let mut previous = Duration::ZERO;
        for attempt in 1..64 {
            let delay = p.backoff(attempt);
            assert!(delay >= previous, "attempt {attempt}: {delay:?} < {previous:?}");
            assert!(delay <= p.max_backoff);
            previous = delay;
        }
    }

    // ---- attempts ----

    #[test]
    fn disabled_policy_makes_one_attempt() {
        let p = RetryPolicy {
            max_attempts: 7,
            ..RetryPolicy::disabled()
        };
        assert_eq!(p.attempts(), 1);
    }

    #[test]
    fn enabled_policy_uses_max_attempts() {
        assert_eq!(RetryPolicy::default().attempts(), 3);
    }

    #[test]
    fn defaults_match_documented_values() {
        let p = RetryPolicy::default();
        assert!(p.enabled);
        assert_eq!(p.initial_backoff, Duration::from_millis(500));
        assert_eq!(p.max_backoff, Duration::from_millis(5000));
    }

    // ---- validate ----

    #[test]
    fn zero_attempts_rejected() {
        let p = RetryPolicy {
            max_attempts: 0,
            ..RetryPolicy::default()
        };
        assert!(matches!(p.validate(), Err(DirectoryError::InvalidInput(_))));
    }

    #[test]
    fn inverted_backoff_rejected() {
        assert!(policy(6000, 5000).validate().is_err());
        assert!(policy(100, 5000).validate().is_ok());
    }
}
