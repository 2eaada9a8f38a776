//! Retry policy: exponential backoff with optional full jitter.
//!
//! Only rate-limit failures are retried by default. Connection-level and
//! server-side (5xx) failures can be opted into the same backoff via config,
//! but stay fatal out of the box so an outage is not masked as slowness.

use crate::Error;
use rand::Rng;
use std::time::Duration;

/// Outcome of consulting the policy after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Decision {
    Retry { delay: Duration },
    Fail,
}

/// Immutable retry configuration, created once per client and freely shared.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retries; total attempts never exceed
    /// `max_retries + 1`.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Upper bound on any computed delay.
    pub max_delay: Duration,
    /// Multiplier applied per attempt; must be greater than 1.
    pub exponential_base: f64,
    /// Sample the final delay uniformly from `[0, computed]` (full jitter)
    /// to spread retries of concurrent clients.
    pub jitter: bool,
    /// Also retry transport-level failures (connection refused, timeouts).
    pub retry_connect_errors: bool,
    /// Also retry 5xx responses.
    pub retry_server_errors: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
            exponential_base: 2.0,
            jitter: true,
            retry_connect_errors: false,
            retry_server_errors: false,
        }
    }
}

impl RetryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    pub fn with_exponential_base(mut self, exponential_base: f64) -> Self {
        self.exponential_base = exponential_base;
        self
    }

    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn with_retry_connect_errors(mut self, retry: bool) -> Self {
        self.retry_connect_errors = retry;
        self
    }

    pub fn with_retry_server_errors(mut self, retry: bool) -> Self {
        self.retry_server_errors = retry;
        self
    }

    /// Check the configuration invariants: positive base delay, a cap at
    /// least as large, and a growth factor above 1.
    pub fn validate(&self) -> crate::Result<()> {
        if self.base_delay.is_zero() {
            return Err(invalid_config("base_delay must be positive"));
        }
        if self.max_delay < self.base_delay {
            return Err(invalid_config("max_delay must be >= base_delay"));
        }
        if !(self.exponential_base > 1.0) || !self.exponential_base.is_finite() {
            return Err(invalid_config("exponential_base must be > 1"));
        }
        Ok(())
    }

    /// Whether this kind of failure is eligible for retry at all.
    fn is_retryable(&self, err: &Error) -> bool {
        match err {
            Error::RateLimited { .. } => true,
            Error::Transport(_) => self.retry_connect_errors,
            Error::ServerError { .. } => self.retry_server_errors,
            _ => false,
        }
    }

    /// Decide what to do after attempt number `attempt` (1-indexed) failed
    /// with `err`.
    pub(crate) fn decide(&self, err: &Error, attempt: u32) -> Decision {
        if !self.is_retryable(err) || attempt > self.max_retries {
            return Decision::Fail;
        }
        Decision::Retry {
            delay: self.delay_for_attempt(attempt, err.retry_after()),
        }
    }

    /// Backoff delay before retrying after the given failed attempt
    /// (1-indexed): `min(max_delay, base_delay * exponential_base^(n-1))`,
    /// jittered when enabled. A server-provided retry-after hint wins
    /// whenever it is larger; never wait less than the server demands.
    pub fn delay_for_attempt(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        self.delay_with_rng(attempt, retry_after, &mut rand::thread_rng())
    }

    /// Same as [`delay_for_attempt`](Self::delay_for_attempt) with an
    /// injected randomness source, so jitter distributions are testable with
    /// a seeded generator.
    pub fn delay_with_rng<R: Rng>(
        &self,
        attempt: u32,
        retry_after: Option<Duration>,
        rng: &mut R,
    ) -> Duration {
        let exponent = attempt.saturating_sub(1) as i32;
        let raw = self.base_delay.as_secs_f64() * self.exponential_base.powi(exponent);
        let capped = raw.min(self.max_delay.as_secs_f64());
        let computed = if self.jitter && capped > 0.0 {
            rng.gen_range(0.0..=capped)
        } else {
            capped
        };
        let mut delay = Duration::from_secs_f64(computed);
        if let Some(server) = retry_after {
            if server > delay {
                delay = server;
            }
        }
        delay
    }
}

fn invalid_config(msg: &str) -> Error {
    Error::BadRequest {
        status: 0,
        message: format!("invalid retry configuration: {msg}"),
    }
}
