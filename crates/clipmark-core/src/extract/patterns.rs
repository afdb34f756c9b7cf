//! Compiled tag patterns.
//!
//! Values use `[^"']+`, so an empty `content=""` never matches and extracted
//! fields are never empty.

use regex::Regex;
use std::sync::LazyLock;

pub(super) static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<title[^>]*>([^<]+)</title>").unwrap());

static OG_IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| property_first("property", "og:image"));
static OG_IMAGE_RE2: LazyLock<Regex> = LazyLock::new(|| content_first("property", "og:image"));

static OG_TITLE_RE: LazyLock<Regex> = LazyLock::new(|| property_first("property", "og:title"));
static OG_TITLE_RE2: LazyLock<Regex> = LazyLock::new(|| content_first("property", "og:title"));

static OG_DESC_RE: LazyLock<Regex> =
    LazyLock::new(|| property_first("property", "og:description"));
static OG_DESC_RE2: LazyLock<Regex> =
    LazyLock::new(|| content_first("property", "og:description"));

static META_DESC_RE: LazyLock<Regex> = LazyLock::new(|| property_first("name", "description"));
static META_DESC_RE2: LazyLock<Regex> = LazyLock::new(|| content_first("name", "description"));

static KEYWORDS_RE: LazyLock<Regex> = LazyLock::new(|| property_first("name", "keywords"));
static KEYWORDS_RE2: LazyLock<Regex> = LazyLock::new(|| content_first("name", "keywords"));

/// The meta tags the extractor looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum MetaKey {
    OgImage,
    OgTitle,
    OgDescription,
    Description,
    Keywords,
}

impl MetaKey {
    pub(super) fn property_first(self) -> &'static Regex {
        match self {
            MetaKey::OgImage => &*OG_IMAGE_RE,
            MetaKey::OgTitle => &*OG_TITLE_RE,
            MetaKey::OgDescription => &*OG_DESC_RE,
            MetaKey::Description => &*META_DESC_RE,
            MetaKey::Keywords => &*KEYWORDS_RE,
        }
    }

    pub(super) fn content_first(self) -> &'static Regex {
        match self {
            MetaKey::OgImage => &*OG_IMAGE_RE2,
            MetaKey::OgTitle => &*OG_TITLE_RE2,
            MetaKey::OgDescription => &*OG_DESC_RE2,
            MetaKey::Description => &*META_DESC_RE2,
            MetaKey::Keywords => &*KEYWORDS_RE2,
        }
    }
}

fn property_first(attr: &str, value: &str) -> Regex {
    Regex::new(&format!(
        r#"(?i)<meta[^>]*{attr}=["']{}["'][^>]*content=["']([^"']+)["'][^>]*>"#,
        regex::escape(value)
    ))
    .unwrap()
}

fn content_first(attr: &str, value: &str) -> Regex {
    Regex::new(&format!(
        r#"(?i)<meta[^>]*content=["']([^"']+)["'][^>]*{attr}=["']{}["'][^>]*>"#,
        regex::escape(value)
    ))
    .unwrap()
}
