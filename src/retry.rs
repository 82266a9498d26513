/// Bounded synchronous retries
///
/// Runs an attempt up to `max_attempts` times and stops at the first success.
use crate::config::types::{QaError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetryOutcome {
    /// Succeeded on the given 1-based attempt
    Succeeded { attempt: u32 },
    /// Every allowed attempt failed
    Exhausted { attempts: u32 },
}

impl RetryOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RetryOutcome::Succeeded { .. })
    }

    /// Attempts actually made
    pub fn attempts(&self) -> u32 {
        match *self {
            RetryOutcome::Succeeded { attempt } => attempt,
            RetryOutcome::Exhausted { attempts } => attempts,
        }
    }
}

impl fmt::Display for RetryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetryOutcome::Succeeded { attempt } => write!(f, "succeeded on attempt {}", attempt),
            RetryOutcome::Exhausted { attempts } => write!(f, "failed after {} attempts", attempts),
        }
    }
}

/// Call `attempt` with the 1-based attempt number until it returns true
///
/// Fails with `QaError::Configuration` when `max_attempts` is zero.
pub fn run_with_retries<F>(max_attempts: u32, mut attempt: F) -> Result<RetryOutcome>
where
    F: FnMut(u32) -> bool,
{
    if max_attempts == 0 {
        return Err(QaError::Configuration(
            "max_attempts must be at least 1".to_string(),
        ));
    }

    for n in 1..=max_attempts {
        if attempt(n) {
            log::debug!("attempt {}/{} succeeded", n, max_attempts);
            return Ok(RetryOutcome::Succeeded { attempt: n });
        }
        log::debug!("attempt {}/{} failed", n, max_attempts);
    }

    Ok(RetryOutcome::Exhausted {
        attempts: max_attempts,
    })
}
