//! Canonical form: the validated URL without query string or fragment.

use url::Url;

use super::{CanonicalUrl, ValidUrl};

/// Removes query and fragment. Path, scheme, host and port are kept as parsed.
pub fn canonicalize(url: &ValidUrl) -> CanonicalUrl {
    let mut inner = url.0.clone();
    inner.set_query(None);
    inner.set_fragment(None);
    CanonicalUrl(inner)
}

/// String form of [`canonicalize`] for unvalidated input.
///
/// Returns `input` unchanged when it does not parse.
pub fn canonicalize_str(input: &str) -> String {
    match Url::parse(input) {
        Ok(mut u) => {
            u.set_query(None);
            u.set_fragment(None);
            u.into()
        }
        Err(_) => input.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::url_model::validate;

    #[test]
    fn strips_query_and_fragment() {
        let c = canonicalize(&validate("https://example.com/page?x=1#y").unwrap());
        assert_eq!(c.as_str(), "https://example.com/page");
        assert_eq!(c.as_url().query(), None);
        assert_eq!(c.as_url().fragment(), None);
    }

    #[test]
    fn keeps_scheme_host_port_path() {
        let v = validate("http://Example.com:8080/a/b/c.html?utm=1").unwrap();
        let c = canonicalize(&v);
        assert_eq!(c.as_url().scheme(), v.as_url().scheme());
        assert_eq!(c.as_url().host_str(), v.as_url().host_str());
        assert_eq!(c.as_url().port(), Some(8080));
        assert_eq!(c.as_url().path(), "/a/b/c.html");
    }

    #[test]
    fn empty_query_and_bare_fragment_removed() {
        let c = canonicalize(&validate("https://example.com/x?#").unwrap());
        assert_eq!(c.as_str(), "https://example.com/x");
    }

    #[test]
    fn idempotent() {
        let once = canonicalize(&validate("https://example.com/p?q=1#frag").unwrap());
        let twice = canonicalize(&once.to_valid());
        assert_eq!(once, twice);
        assert_eq!(once.as_str(), twice.as_str());
    }

    #[test]
    fn str_form_falls_back_to_input() {
        assert_eq!(canonicalize_str("not a url"), "not a url");
        assert_eq!(
            canonicalize_str("https://example.com/a?b=1#c"),
            "https://example.com/a"
        );
    }
}
