use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// governs how many times a randomized draw may be repeated before giving up.
///
/// applies to candidate batches of the polygon sampler and to the draws made
/// for a single route. an unbounded policy never gives up, so a study area
/// that cannot yield a valid route will loop forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RetryPolicy {
    #[default]
    Unbounded,
    MaxAttempts {
        max_attempts: u64,
    },
}

impl RetryPolicy {
    /// true if the (1-based) attempt number is allowed under this policy.
    pub fn permits(&self, attempt: u64) -> bool {
        match self {
            RetryPolicy::Unbounded => true,
            RetryPolicy::MaxAttempts { max_attempts } => attempt <= *max_attempts,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        match self {
            RetryPolicy::MaxAttempts { max_attempts: 0 } => Err(String::from(
                "max_attempts must be at least 1",
            )),
            _ => Ok(()),
        }
    }
}

impl Display for RetryPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RetryPolicy::Unbounded => write!(f, "unbounded"),
            RetryPolicy::MaxAttempts { max_attempts } => write!(f, "max {max_attempts} attempts"),
        }
    }
}
