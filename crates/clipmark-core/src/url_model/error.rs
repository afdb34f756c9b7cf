//! Validation error for captured input.

use thiserror::Error;

/// Reason reported when a string is not an absolute URL with a host.
pub const NOT_A_URL: &str = "not-a-url";

/// Input could not be accepted as a URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct ValidationError {
    pub reason: &'static str,
}

impl ValidationError {
    pub(crate) fn not_a_url() -> Self {
        Self { reason: NOT_A_URL }
    }
}
