use std::time::Duration;

/// Bounded retry configuration for rate-limited completions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles after every retry
    pub initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_secs(6),
        }
    }
}

impl RetryPolicy {
    pub fn backoff(&self) -> Backoff {
        Backoff {
            max_attempts: self.max_attempts.max(1),
            attempt: 1,
            delay: self.initial_backoff,
        }
    }
}

/// Attempt counter plus doubling delay.
///
/// `attempt` is the 1-based number of the attempt currently in flight.
#[derive(Debug, Clone)]
pub struct Backoff {
    max_attempts: u32,
    attempt: u32,
    delay: Duration,
}

impl Backoff {
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Advances to the next attempt and returns how long to wait before it,
    /// or `None` once the attempt cap is reached.
    pub fn next_delay(&mut self) -> Option<Duration> {
        if self.attempt >= self.max_attempts {
            return None;
        }

        let delay = self.delay;
        self.attempt += 1;
        self.delay = self.delay.saturating_mul(2);
        Some(delay)
    }
}
