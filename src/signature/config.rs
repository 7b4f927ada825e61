use std::time::Duration;

use crate::signature::engine::SignatureError;
use crate::utils::validation::validate_fraction;

/// Default minimum fraction of in-set genomes that must contain a family
pub const DEFAULT_MIN_IN: f64 = 0.9;

/// Default maximum fraction of out-set genomes allowed to contain a family
pub const DEFAULT_MAX_OUT: f64 = 0.1;

/// Default number of genomes between progress messages
pub const DEFAULT_PROGRESS_INTERVAL: usize = 1000;

/// Upper bound on the default worker count, to avoid overwhelming the data source
pub const MAX_DEFAULT_THREADS: usize = 8;

/// Default retries per genome when the data source is unavailable
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Fetch attempts required before the run-level unavailability check applies
pub const MIN_ATTEMPTS_FOR_MAJORITY: usize = 8;

/// How fetches that fail with `SourceError::Unavailable` are retried
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries per genome after the first attempt
    pub max_retries: u32,
    /// Delay before the first retry; doubled on each subsequent retry
    pub initial_backoff: Duration,
    /// Cap on the delay between retries
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            initial_backoff: Duration::from_millis(50),
            max_backoff: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `retry` (1-based)
    #[must_use]
    pub fn backoff(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry.saturating_sub(1));
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }
}

/// Configuration for the signature engine
#[derive(Debug, Clone)]
pub struct SignatureConfig {
    /// Minimum fraction of in-set genomes containing a family
    pub min_in: f64,
    /// Maximum fraction of out-set genomes containing a family
    pub max_out: f64,
    /// Size of the worker pool
    pub threads: usize,
    /// Genomes between progress messages (0 disables periodic messages)
    pub progress_interval: usize,
    pub retry: RetryPolicy,
}

impl Default for SignatureConfig {
    fn default() -> Self {
        Self {
            min_in: DEFAULT_MIN_IN,
            max_out: DEFAULT_MAX_OUT,
            threads: default_threads(),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            retry: RetryPolicy::default(),
        }
    }
}

impl SignatureConfig {
    /// Create a validated configuration with the given thresholds
    ///
    /// # Errors
    ///
    /// Returns `SignatureError::Configuration` if either threshold is outside `[0, 1]`.
    pub fn new(min_in: f64, max_out: f64) -> Result<Self, SignatureError> {
        let config = Self {
            min_in,
            max_out,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    #[must_use]
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Check every field; called by the engine before any data is read
    ///
    /// # Errors
    ///
    /// Returns `SignatureError::Configuration` describing the first invalid field.
    pub fn validate(&self) -> Result<(), SignatureError> {
        validate_fraction("min_in", self.min_in)
            .and_then(|_| validate_fraction("max_out", self.max_out))
            .map_err(|e| SignatureError::Configuration(e.to_string()))?;

        if self.threads == 0 {
            return Err(SignatureError::Configuration(
                "threads must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

fn default_threads() -> usize {
    std::thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .unwrap_or(1)
        .min(MAX_DEFAULT_THREADS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SignatureConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.min_in - 0.9).abs() < f64::EPSILON);
        assert!((config.max_out - 0.1).abs() < f64::EPSILON);
        assert!(config.threads >= 1 && config.threads <= MAX_DEFAULT_THREADS);
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(matches!(
            SignatureConfig::new(1.2, 0.1),
            Err(SignatureError::Configuration(_))
        ));
        assert!(matches!(
            SignatureConfig::new(0.9, -0.5),
            Err(SignatureError::Configuration(_))
        ));
        assert!(SignatureConfig::new(f64::NAN, 0.1).is_err());
        assert!(SignatureConfig::new(0.0, 1.0).is_ok());
    }

    #[test]
    fn test_zero_threads_rejected() {
        let config = SignatureConfig::default().with_threads(0);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("threads"));
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let policy = RetryPolicy {
            max_retries: 10,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_millis(500),
        };
        assert_eq!(policy.backoff(1), Duration::from_millis(100));
        assert_eq!(policy.backoff(2), Duration::from_millis(200));
        assert_eq!(policy.backoff(3), Duration::from_millis(400));
        assert_eq!(policy.backoff(4), Duration::from_millis(500));
        assert_eq!(policy.backoff(40), Duration::from_millis(500));
    }
}
