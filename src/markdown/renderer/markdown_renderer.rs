use crate::markdown::engine::{create_comrak_options, render_markdown};
use crate::markdown::renderer::syntax::SyntaxHighlighter;
use crate::utils::error::SiteError;

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    options: comrak::Options<'static>,
    syntax_highlighter: SyntaxHighlighter,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        MarkdownRenderer {
            options: create_comrak_options(),
            syntax_highlighter: SyntaxHighlighter::new(),
        }
    }

    /// Render Markdown content to HTML
    pub fn render(&self, content: &str) -> Result<String, SiteError> {
        let html = render_markdown(content, &self.options);
        self.syntax_highlighter.highlight_html(&html)
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        MarkdownRenderer::new()
    }
}

/// Render markdown content to HTML - convenience function
pub fn markdownify(content: &str, renderer: &MarkdownRenderer) -> Result<String, SiteError> {
    renderer.render(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_rendering() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello, World!\n\nThis is a **bold** statement.").unwrap();

        assert!(html.contains("<h1>"));
        assert!(html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn test_fenced_code_with_language_is_highlighted() {
        let renderer = MarkdownRenderer::new();
        let html = renderer
            .render("```rust\nfn main() {}\n```\n")
            .unwrap();

        assert!(html.contains("<pre><code class=\"language-rust\">"));
        assert!(html.contains("<span class=\""));
    }

    #[test]
    fn test_fenced_code_marks() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```\nplain **hot** code\n```\n").unwrap();

        assert!(html.contains("plain <mark>hot</mark> code"));
    }

    #[test]
    fn test_markdownify() {
        let renderer = MarkdownRenderer::new();
        assert_eq!(markdownify("*hi*", &renderer).unwrap(), "<p><em>hi</em></p>\n");
    }
}
