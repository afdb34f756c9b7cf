//! URL modeling: validation and canonicalization of captured links.
//!
//! A captured string becomes a [`ValidUrl`] once it parses as an absolute URL
//! with a host, and a [`CanonicalUrl`] once its query and fragment are removed.
//! The canonical form is the fetch target and the display identity.

mod canonical;
mod error;
mod validate;

pub use canonical::{canonicalize, canonicalize_str};
pub use error::ValidationError;
pub use validate::validate;

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// An absolute URL with a scheme and a host. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidUrl(Url);

impl ValidUrl {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }

    pub fn host_str(&self) -> Option<&str> {
        self.0.host_str()
    }
}

impl fmt::Display for ValidUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// A [`ValidUrl`] with query and fragment removed.
///
/// Scheme, host, port and path are those of the source URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CanonicalUrl(Url);

impl CanonicalUrl {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Hostname used as the preview's `domain`.
    pub fn domain(&self) -> Option<&str> {
        self.0.host_str()
    }

    /// Every canonical URL is still a valid one.
    pub fn to_valid(&self) -> ValidUrl {
        ValidUrl(self.0.clone())
    }
}

impl fmt::Display for CanonicalUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl From<CanonicalUrl> for String {
    fn from(url: CanonicalUrl) -> Self {
        url.0.into()
    }
}

impl TryFrom<String> for CanonicalUrl {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        let valid = validate(&s)?;
        Ok(canonicalize(&valid))
    }
}
