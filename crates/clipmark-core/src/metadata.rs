//! Structured link preview produced by the extraction pipeline.

use serde::{Deserialize, Serialize};

use crate::url_model::CanonicalUrl;

/// Open Graph style summary of a page.
///
/// Every field is either absent or a non-empty string. `domain` is the
/// hostname of the canonical URL the page was fetched from; the other fields
/// are best-effort and may all be absent at once, which is still a valid result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OgMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
}

impl OgMetadata {
    /// True when no field was found (including `domain`).
    pub fn is_empty(&self) -> bool {
        self.image.is_none()
            && self.title.is_none()
            && self.description.is_none()
            && self.domain.is_none()
            && self.keywords.is_none()
    }
}

/// Metadata together with the canonical URL it was fetched from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preview {
    pub url: CanonicalUrl,
    pub metadata: OgMetadata,
}

/// What the capture flow hands to the persistence collaborator on confirmation.
pub type Bookmark = Preview;
