use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref FOOTNOTE_REF_REGEX: Regex =
        Regex::new(r#"(?s)<sup class="footnote-ref">.*?</sup>"#).unwrap();
    static ref ANCHOR_REGEX: Regex = Regex::new(r"(?s)<a\b[^>]*>(.*?)</a>").unwrap();
}

/// First paragraph of rendered HTML, `<p>` through `</p>` inclusive.
/// Empty when there is no complete paragraph.
pub fn first_paragraph(html: &str) -> &str {
    let start = match html.find("<p>") {
        Some(start) => start,
        None => return "",
    };

    match html[start..].find("</p>") {
        Some(end) => &html[start..start + end + "</p>".len()],
        None => "",
    }
}

/// Listing excerpt: the first paragraph without footnote references and with
/// links reduced to their text
pub fn extract_excerpt(html: &str) -> String {
    let paragraph = first_paragraph(html);
    let without_refs = FOOTNOTE_REF_REGEX.replace_all(paragraph, "");
    ANCHOR_REGEX.replace_all(&without_refs, "$1").into_owned()
}

/// Trailing link appended to every article excerpt
pub fn call_to_action(permalink: &str, title: Option<&str>, external: bool) -> String {
    let label = if external { "Permalink" } else { "Read More…" };
    format!(
        "<p><a href=\"{}\" title=\"{}\">{}</a></p>",
        html_escape::encode_double_quoted_attribute(permalink),
        html_escape::encode_double_quoted_attribute(title.unwrap_or_default()),
        label
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footnote_refs_are_stripped() {
        let html = "<p>Hello <sup class=\"footnote-ref\">1</sup> world</p><p>more</p>";
        assert_eq!(extract_excerpt(html), "<p>Hello  world</p>");
    }

    #[test]
    fn test_comrak_footnote_ref_with_link() {
        let html = "<p>Text<sup class=\"footnote-ref\"><a href=\"#fn-1\" id=\"fnref-1\" data-footnote-ref>1</a></sup>.</p>";
        assert_eq!(extract_excerpt(html), "<p>Text.</p>");
    }

    #[test]
    fn test_anchors_unwrapped() {
        let html = "<h1>T</h1>\n<p>See <a href=\"https://x.test\">this <em>thing</em></a> and <a href=\"/y\">that</a>.</p>\n<p>Next</p>";
        assert_eq!(extract_excerpt(html), "<p>See this <em>thing</em> and that.</p>");
    }

    #[test]
    fn test_no_paragraph() {
        assert_eq!(extract_excerpt("<h1>Only a heading</h1>"), "");
        assert_eq!(extract_excerpt("<p>unterminated"), "");
    }

    #[test]
    fn test_call_to_action() {
        assert_eq!(
            call_to_action("/articles/a/", Some("A \"quoted\" title"), false),
            "<p><a href=\"/articles/a/\" title=\"A &quot;quoted&quot; title\">Read More…</a></p>"
        );
        assert!(call_to_action("/articles/a/", None, true).contains(">Permalink</a>"));
    }
}
