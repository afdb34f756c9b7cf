//! Plain-text preview card.

use clipmark_core::metadata::Preview;
use std::fmt::Write;

/// Domain, title, description, image and keywords (each only if present),
/// then the canonical URL.
pub fn render_preview(preview: &Preview) -> String {
    let m = &preview.metadata;
    let mut out = String::new();
    if let Some(domain) = &m.domain {
        let _ = writeln!(out, "{}", domain);
    }
    if let Some(title) = &m.title {
        let _ = writeln!(out, "  {}", title);
    }
    if let Some(description) = &m.description {
        let _ = writeln!(out, "  {}", description);
    }
    if let Some(image) = &m.image {
        let _ = writeln!(out, "  image:    {}", image);
    }
    if let Some(keywords) = &m.keywords {
        let _ = writeln!(out, "  keywords: {}", keywords);
    }
    let _ = writeln!(out, "  {}", preview.url);
    out
}
