use std::time::Duration;

use rand::Rng;

use crate::config::RetryConfig;

/// Bounded retry with jittered exponential backoff.
///
/// `max_attempts == 1` means a single try and no retries.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    max_attempts: u32,
    initial_backoff: Duration,
    max_backoff: Duration,
    multiplier: f64,
}

impl RetryPolicy {
    pub fn single_attempt() -> Self {
        Self::from_config(&RetryConfig::default())
    }

    pub fn from_config(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            initial_backoff: config.initial_backoff,
            max_backoff: config.max_backoff,
            multiplier: config.multiplier.max(1.0),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub(crate) fn backoff(&self) -> Backoff {
        Backoff {
            attempt: 0,
            max_attempts: self.max_attempts,
            current: self.initial_backoff,
            max_backoff: self.max_backoff,
            multiplier: self.multiplier,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::single_attempt()
    }
}

pub(crate) struct Backoff {
    attempt: u32,
    max_attempts: u32,
    current: Duration,
    max_backoff: Duration,
    multiplier: f64,
}

impl Backoff {
    /// Delay before the next attempt, or `None` once attempts are exhausted.
    pub(crate) fn next_delay(&mut self) -> Option<Duration> {
        self.attempt += 1;
        if self.attempt >= self.max_attempts {
            return None;
        }

        let base = self.current.min(self.max_backoff);
        self.current = self.current.mul_f64(self.multiplier).min(self.max_backoff);

        // Equal jitter: somewhere between half and all of the base delay.
        let factor = rand::rng().random_range(0.5..=1.0);
        Some(base.mul_f64(factor))
    }

    pub(crate) fn attempt(&self) -> u32 {
        self.attempt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy::from_config(&RetryConfig {
            max_attempts,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_millis(300),
            multiplier: 2.0,
        })
    }

    #[test]
    fn single_attempt_never_waits() {
        let mut backoff = RetryPolicy::single_attempt().backoff();
        assert!(backoff.next_delay().is_none());
    }

    #[test]
    fn stops_after_max_attempts() {
        let mut backoff = policy(3).backoff();
        assert!(backoff.next_delay().is_some());
        assert!(backoff.next_delay().is_some());
        assert!(backoff.next_delay().is_none());
        assert_eq!(backoff.attempt(), 3);
    }

    #[test]
    fn delays_are_jittered_within_bounds() {
        let mut backoff = policy(6).backoff();
        let mut ceiling = Duration::from_millis(100);
        while let Some(delay) = backoff.next_delay() {
            let slack = Duration::from_millis(1);
            assert!(delay <= ceiling + slack, "{delay:?} exceeded {ceiling:?}");
            assert!(delay + slack >= ceiling / 2, "{delay:?} below half of {ceiling:?}");
            ceiling = (ceiling * 2).min(Duration::from_millis(300));
        }
    }

    #[test]
    fn zero_attempts_are_clamped_to_one() {
        assert_eq!(policy(0).max_attempts(), 1);
    }
}
