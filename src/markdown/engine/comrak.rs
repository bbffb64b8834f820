use comrak::Options;

/// Create comrak options: CommonMark plus tables, footnotes, autolinks and
/// heading anchors, with raw HTML passed through.
pub fn create_comrak_options() -> Options<'static> {
    let mut options = Options::default();

    // Extension options
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.footnotes = true;
    options.extension.header_ids = Some(String::new());

    // Render options
    options.render.hardbreaks = false;
    options.render.unsafe_ = true;

    // Typographic quotes and dashes
    options.parse.smart = true;

    options
}

/// Render markdown to HTML using Comrak
pub fn render_markdown(content: &str, options: &Options) -> String {
    comrak::markdown_to_html(content, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comrak_rendering() {
        let options = create_comrak_options();
        let html = render_markdown("## Hello\n\nThis is a **bold** statement.", &options);

        assert!(html.contains("<h2>"));
        assert!(html.contains("id=\"hello\""));
        assert!(html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn test_footnotes_and_tables() {
        let options = create_comrak_options();
        let html = render_markdown(
            "Text[^1]\n\n| a | b |\n|---|---|\n| 1 | 2 |\n\n[^1]: Note.\n",
            &options,
        );

        assert!(html.contains("class=\"footnote-ref\""));
        assert!(html.contains("<table>"));
    }

    #[test]
    fn test_raw_html_passes_through() {
        let options = create_comrak_options();
        let html = render_markdown("<div class=\"x\">raw</div>\n", &options);
        assert!(html.contains("<div class=\"x\">raw</div>"));
    }
}
