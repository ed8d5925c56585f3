use crate::error::{WorkerError, WorkerResult};

pub const PRIMES_TARGET_ENV: &str = "SQS_PRIMES_TARGET";
pub const REGION_ENV: &str = "AWS_REGION";
pub const DELAY_SECONDS_ENV: &str = "SQS_PRIMES_DELAY_SECONDS";
pub const LOG_LEVEL_ENV: &str = "PRIME_RELAY_LOG_LEVEL";

pub const DEFAULT_REGION: &str = "us-east-2";
pub const DEFAULT_DELAY_SECONDS: i32 = 10;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// SQS allows delivery delays between 0 and 15 minutes.
const MAX_DELAY_SECONDS: i32 = 900;

/// Process-wide worker settings, resolved once at cold start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerConfig {
    /// Destination queue URL. Only required once primes need publishing.
    pub primes_target: Option<String>,
    pub region: String,
    pub delay_seconds: i32,
    pub log_level: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            primes_target: None,
            region: DEFAULT_REGION.to_string(),
            delay_seconds: DEFAULT_DELAY_SECONDS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl WorkerConfig {
    pub fn from_env() -> WorkerResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> WorkerResult<Self> {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let delay_seconds = match non_blank(DELAY_SECONDS_ENV) {
            None => DEFAULT_DELAY_SECONDS,
            Some(raw) => parse_delay_seconds(&raw)?,
        };

        Ok(Self {
            primes_target: non_blank(PRIMES_TARGET_ENV),
            region: non_blank(REGION_ENV).unwrap_or_else(|| DEFAULT_REGION.to_string()),
            delay_seconds,
            log_level: non_blank(LOG_LEVEL_ENV).unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        })
    }

    pub fn with_primes_target(mut self, queue_url: impl Into<String>) -> Self {
        self.primes_target = Some(queue_url.into());
        self
    }

    pub fn primes_target(&self) -> WorkerResult<&str> {
        self.primes_target
            .as_deref()
            .ok_or(WorkerError::MissingConfiguration(PRIMES_TARGET_ENV))
    }
}

fn parse_delay_seconds(raw: &str) -> WorkerResult<i32> {
    raw.parse::<i32>()
        .ok()
        .filter(|value| (0..=MAX_DELAY_SECONDS).contains(value))
        .ok_or_else(|| WorkerError::InvalidConfiguration {
            key: DELAY_SECONDS_ENV,
            value: raw.to_string(),
        })
}
