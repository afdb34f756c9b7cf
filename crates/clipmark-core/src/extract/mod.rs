//! Best-effort Open Graph / meta tag extraction.
//!
//! This is a scan for a handful of specific tags, not an HTML parser. Values are
//! taken verbatim: no entity decoding, no trimming. With the default
//! [`AttributeOrder::PropertyFirst`] a tag only matches when its `property` (or
//! `name`) attribute precedes `content`; [`AttributeOrder::Any`] also accepts
//! the reverse order.
//!
//! Extraction never fails. Missing tags leave the field absent.

mod patterns;

use serde::{Deserialize, Serialize};

use crate::metadata::OgMetadata;
use patterns::{MetaKey, TITLE_RE};

/// Which attribute orders a meta tag may use to be matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttributeOrder {
    /// `property`/`name` must come before `content`.
    #[default]
    PropertyFirst,
    /// Either order is accepted; property-first matches are preferred.
    Any,
}

/// Extraction options (the `[extract]` table in config.toml).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractConfig {
    #[serde(default)]
    pub attribute_order: AttributeOrder,
}

/// Scans markup for preview fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct Extractor {
    order: AttributeOrder,
}

impl Extractor {
    pub fn new(cfg: ExtractConfig) -> Self {
        Self {
            order: cfg.attribute_order,
        }
    }

    /// Extracts image, title, description and keywords. `domain` is left unset.
    pub fn extract(&self, html: &str) -> OgMetadata {
        let title = self
            .meta(html, MetaKey::OgTitle)
            .or_else(|| title_element(html));
        let description = self
            .meta(html, MetaKey::OgDescription)
            .or_else(|| self.meta(html, MetaKey::Description));

        OgMetadata {
            image: self.meta(html, MetaKey::OgImage),
            title,
            description,
            domain: None,
            keywords: self.meta(html, MetaKey::Keywords),
        }
    }

    fn meta(&self, html: &str, key: MetaKey) -> Option<String> {
        let first = key.property_first().captures(html);
        let caps = match (first, self.order) {
            (Some(c), _) => Some(c),
            (None, AttributeOrder::Any) => key.content_first().captures(html),
            (None, AttributeOrder::PropertyFirst) => None,
        }?;
        Some(caps.get(1)?.as_str().to_string())
    }
}

/// Extracts with default options.
pub fn extract(html: &str) -> OgMetadata {
    Extractor::default().extract(html)
}

fn title_element(html: &str) -> Option<String> {
    let caps = TITLE_RE.captures(html)?;
    Some(caps.get(1)?.as_str().to_string())
}

#[cfg(test)]
mod tests;
