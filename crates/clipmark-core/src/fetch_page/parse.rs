//! Pick response metadata out of collected header lines.

/// `Content-Type` of the last response block (after any redirects).
pub(crate) fn content_type(lines: &[String]) -> Option<String> {
    let mut value = None;

    for line in lines {
        let line = line.trim();
        if line.starts_with("HTTP/") {
            // New status line: headers of an earlier (redirect) response no longer apply.
            value = None;
            continue;
        }
        if let Some((name, v)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-type") {
                value = Some(v.trim().to_string());
            }
        }
    }

    value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn content_type_found() {
        let h = lines(&[
            "HTTP/1.1 200 OK",
            "Content-Length: 10",
            "content-type: text/html; charset=utf-8",
            "",
        ]);
        assert_eq!(content_type(&h).as_deref(), Some("text/html; charset=utf-8"));
    }

    #[test]
    fn content_type_missing() {
        let h = lines(&["HTTP/1.1 200 OK", "Content-Length: 0", ""]);
        assert_eq!(content_type(&h), None);
    }

    #[test]
    fn content_type_from_final_response_only() {
        let h = lines(&[
            "HTTP/1.1 301 Moved Permanently",
            "Content-Type: text/plain",
            "Location: /next",
            "",
            "HTTP/1.1 200 OK",
            "Content-Length: 3",
            "",
        ]);
        assert_eq!(content_type(&h), None);
    }
}
