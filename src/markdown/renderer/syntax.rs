use lazy_static::lazy_static;
use regex::{Captures, Regex};
use syntect::html::{ClassedHTMLGenerator, ClassStyle};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::utils::error::SiteError;

lazy_static! {
    static ref SYNTAX_SET: SyntaxSet = SyntaxSet::load_defaults_newlines();

    // Fenced code blocks as comrak emits them
    static ref CODE_BLOCK_REGEX: Regex =
        Regex::new(r#"<pre><code(?: class="language-([^"]+)")?>([^<]*)</code></pre>"#).unwrap();

    // `**text**` inside code marks a highlighted span
    static ref MARK_REGEX: Regex = Regex::new(r"\*\*(.+?)\*\*").unwrap();
}

/// Syntax highlighting for fenced code blocks in rendered HTML.
///
/// Blocks with a language hint that syntect knows are rewritten with classed
/// spans (`ClassStyle::Spaced`, styled by the site stylesheet). Blocks without
/// a hint keep their escaped text. In both cases `**text**` becomes
/// `<mark>text</mark>`.
#[derive(Debug, Clone, Default)]
pub struct SyntaxHighlighter;

impl SyntaxHighlighter {
    pub fn new() -> Self {
        SyntaxHighlighter
    }

    /// Process HTML content to add syntax highlighting to code blocks
    pub fn highlight_html(&self, html: &str) -> Result<String, SiteError> {
        let mut failure = None;

        let highlighted = CODE_BLOCK_REGEX.replace_all(html, |caps: &Captures| {
            let escaped = &caps[2];
            let body = match caps.get(1) {
                Some(lang) => {
                    let code = html_escape::decode_html_entities(escaped);
                    match self.highlight_code(&code, lang.as_str()) {
                        Ok(Some(code)) => code,
                        Ok(None) => escaped.to_string(),
                        Err(e) => {
                            if failure.is_none() {
                                failure = Some(e);
                            }
                            escaped.to_string()
                        }
                    }
                }
                None => escaped.to_string(),
            };

            let body = MARK_REGEX.replace_all(&body, "<mark>$1</mark>");
            match caps.get(1) {
                Some(lang) => format!(
                    "<pre><code class=\"language-{}\">{}</code></pre>",
                    lang.as_str(),
                    body
                ),
                None => format!("<pre><code>{}</code></pre>", body),
            }
        });

        match failure {
            Some(e) => Err(e),
            None => Ok(highlighted.into_owned()),
        }
    }

    /// Highlight a code block, `None` when the language is unknown
    pub fn highlight_code(&self, code: &str, lang: &str) -> Result<Option<String>, SiteError> {
        let syntax = match SYNTAX_SET.find_syntax_by_token(lang) {
            Some(syntax) => syntax,
            None => return Ok(None),
        };

        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &SYNTAX_SET, ClassStyle::Spaced);

        for line in LinesWithEndings::from(code) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .map_err(|e| SiteError::Markdown(format!("highlighting {} failed: {}", lang, e)))?;
        }

        Ok(Some(generator.finalize()))
    }
}
