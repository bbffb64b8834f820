mod absolute_url;
mod format;
mod markdownify;

use liquid::ParserBuilder;
use crate::config::Config;

/// Register custom filters for use in Liquid templates
pub fn register_filters(parser_builder: ParserBuilder, config: &Config) -> ParserBuilder {
    parser_builder
        .filter(format::FormatFilterParser {
            default_pattern: config.date_format.clone(),
        })
        .filter(absolute_url::AbsoluteUrlFilterParser {
            base_url: config.base_url(),
        })
        .filter(markdownify::MarkdownifyFilterParser)
}

