use super::*;

const FULL_PAGE: &str = r#"<!doctype html>
<html>
<head>
  <title>Page Title</title>
  <meta property="og:title" content="OG Title">
  <meta property="og:description" content="OG description">
  <meta property="og:image" content="https://example.com/cover.png" />
  <meta name="description" content="Plain description">
  <meta name="keywords" content="rust, bookmarks">
</head>
<body></body>
</html>"#;

#[test]
fn og_title_extracted() {
    let m = extract(r#"<meta property="og:title" content="Example">"#);
    assert_eq!(m.title.as_deref(), Some("Example"));
}

#[test]
fn title_falls_back_to_title_element() {
    let m = extract("<html><head><title>Fallback</title></head></html>");
    assert_eq!(m.title.as_deref(), Some("Fallback"));
}

#[test]
fn no_title_at_all_is_not_an_error() {
    let m = extract("<html><body><p>hello</p></body></html>");
    assert_eq!(m.title, None);
    assert!(m.is_empty());
}

#[test]
fn og_fields_take_precedence_over_fallbacks() {
    let m = extract(FULL_PAGE);
    assert_eq!(m.title.as_deref(), Some("OG Title"));
    assert_eq!(m.description.as_deref(), Some("OG description"));
    assert_eq!(m.image.as_deref(), Some("https://example.com/cover.png"));
    assert_eq!(m.keywords.as_deref(), Some("rust, bookmarks"));
    assert_eq!(m.domain, None);
}

#[test]
fn description_falls_back_to_meta_description() {
    let m = extract(r#"<meta name="description" content="Plain description">"#);
    assert_eq!(m.description.as_deref(), Some("Plain description"));
}

#[test]
fn keywords_have_no_fallback() {
    let m = extract(r#"<meta property="og:keywords" content="a,b"><title>T</title>"#);
    assert_eq!(m.keywords, None);
}

#[test]
fn first_occurrence_wins() {
    let m = extract(
        r#"<meta property="og:image" content="first.png"><meta property="og:image" content="second.png">"#,
    );
    assert_eq!(m.image.as_deref(), Some("first.png"));
}

#[test]
fn tag_and_attribute_names_are_case_insensitive() {
    let m = extract(r#"<META PROPERTY='og:title' CONTENT='Shouting'><TITLE>Other</TITLE>"#);
    assert_eq!(m.title.as_deref(), Some("Shouting"));
    let m = extract("<Title>Mixed</tItLe>");
    assert_eq!(m.title.as_deref(), Some("Mixed"));
}

#[test]
fn values_are_verbatim() {
    let m = extract(r#"<meta property="og:title" content="  Tom &amp; Jerry  ">"#);
    assert_eq!(m.title.as_deref(), Some("  Tom &amp; Jerry  "));
}

#[test]
fn extra_attributes_between_are_allowed() {
    let m = extract(
        r#"<meta data-x="1" property="og:description" id="d" content="Between" data-y="2">"#,
    );
    assert_eq!(m.description.as_deref(), Some("Between"));
}

#[test]
fn content_before_property_not_matched_by_default() {
    let html = r#"<meta content="Reversed" property="og:title"><title>Fallback</title>"#;
    let m = extract(html);
    assert_eq!(m.title.as_deref(), Some("Fallback"));
}

#[test]
fn content_before_property_matched_with_any_order() {
    let html = r#"<meta content="Reversed" property="og:title"><title>Fallback</title>"#;
    let ex = Extractor::new(ExtractConfig {
        attribute_order: AttributeOrder::Any,
    });
    assert_eq!(ex.extract(html).title.as_deref(), Some("Reversed"));
}

#[test]
fn any_order_prefers_property_first_match() {
    let html = r#"<meta content="B" name="keywords"><meta name="keywords" content="A">"#;
    let ex = Extractor::new(ExtractConfig {
        attribute_order: AttributeOrder::Any,
    });
    assert_eq!(ex.extract(html).keywords.as_deref(), Some("A"));
}

#[test]
fn empty_content_is_absent() {
    let m = extract(r#"<meta property="og:image" content=""><meta name="keywords" content=''>"#);
    assert_eq!(m.image, None);
    assert_eq!(m.keywords, None);
}

#[test]
fn og_image_does_not_match_sub_properties() {
    let m = extract(r#"<meta property="og:image:width" content="1200">"#);
    assert_eq!(m.image, None);
}
