//! Fetch failures and classification of transport errors.

use std::fmt;
use thiserror::Error;

/// Why a fetch failed below the HTTP layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkFailure {
    /// Host name could not be resolved.
    Dns,
    /// TCP connection refused or unreachable.
    Connect,
    /// TLS handshake or certificate verification failed.
    Tls,
    /// Transport timeout fired.
    Timeout,
    /// Anything else (read/send errors, unsupported protocol, ...).
    Other,
}

impl fmt::Display for NetworkFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NetworkFailure::Dns => "dns",
            NetworkFailure::Connect => "connect",
            NetworkFailure::Tls => "tls",
            NetworkFailure::Timeout => "timeout",
            NetworkFailure::Other => "network",
        };
        f.write_str(s)
    }
}

/// Page retrieval failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Transport-level failure; no HTTP status was received.
    #[error("{kind} error: {message}")]
    Network {
        kind: NetworkFailure,
        message: String,
    },
    /// The server answered with a status outside 200-299.
    #[error("HTTP {status}")]
    HttpStatus { status: u32 },
}

impl FetchError {
    /// HTTP status, when the failure carried one.
    pub fn status(&self) -> Option<u32> {
        match self {
            FetchError::HttpStatus { status } => Some(*status),
            FetchError::Network { .. } => None,
        }
    }
}

impl From<curl::Error> for FetchError {
    fn from(e: curl::Error) -> Self {
        FetchError::Network {
            kind: classify_curl_error(&e),
            message: e.to_string(),
        }
    }
}

/// Classify a curl error into a [`NetworkFailure`].
pub fn classify_curl_error(e: &curl::Error) -> NetworkFailure {
    if e.is_couldnt_resolve_host() || e.is_couldnt_resolve_proxy() {
        return NetworkFailure::Dns;
    }
    if e.is_couldnt_connect() {
        return NetworkFailure::Connect;
    }
    if e.is_ssl_connect_error() || e.is_peer_failed_verification() || e.is_ssl_certproblem() {
        return NetworkFailure::Tls;
    }
    if e.is_operation_timedout() {
        return NetworkFailure::Timeout;
    }
    NetworkFailure::Other
}
