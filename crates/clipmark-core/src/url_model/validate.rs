//! Syntactic URL validation. No network access.

use url::Url;

use super::{ValidUrl, ValidationError};

/// Accepts any well-formed absolute URL that has a host, regardless of scheme.
///
/// Reachability is not checked. Empty strings, relative references and
/// host-less URLs (`mailto:`, `file:///`) fail with reason `not-a-url`.
pub fn validate(input: &str) -> Result<ValidUrl, ValidationError> {
    let parsed = Url::parse(input).map_err(|e| {
        tracing::debug!("rejecting {:?}: {}", input, e);
        ValidationError::not_a_url()
    })?;
    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(ValidUrl(parsed)),
        _ => {
            tracing::debug!("rejecting {:?}: no host", input);
            Err(ValidationError::not_a_url())
        }
    }
}
