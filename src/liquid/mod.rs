mod filters;

use liquid::model::Value;
use liquid::partials::{InMemorySource, LazyCompiler};
use liquid::{Object, Parser, ParserBuilder};

use crate::config::Config;
use crate::utils::error::SiteError;

/// Create the Liquid parser used for both rendering passes.
///
/// Every template is registered as a partial under its name, so templates
/// can `{% include %}` each other. Partials are compiled lazily: a syntax
/// error in one template only fails the pages that reach it.
pub fn create_parser<'a, I>(config: &Config, templates: I) -> Result<Parser, SiteError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut source = InMemorySource::new();
    for (name, body) in templates {
        source.add(name.to_string(), body.to_string());
    }

    let parser_builder = filters::register_filters(ParserBuilder::with_stdlib(), config);

    parser_builder
        .partials(LazyCompiler::new(source))
        .build()
        .map_err(|e| SiteError::Template(e.to_string()))
}

/// Parse and render a template source against the given globals
pub fn render_liquid(parser: &Parser, source: &str, globals: &Object) -> Result<String, SiteError> {
    let template = parser
        .parse(source)
        .map_err(|e| SiteError::Template(e.to_string()))?;

    template.render(globals).map_err(|e| {
        log::debug!("Error rendering Liquid template: {}", e);
        SiteError::Template(e.to_string())
    })
}

/// Assemble the render context: `site`, `page`, and the top-level `content`
pub fn create_globals(site: &Object, page: &Object, content: Option<&str>) -> Object {
    let mut globals = Object::new();
    globals.insert("site".into(), Value::Object(site.clone()));
    globals.insert("page".into(), Value::Object(page.clone()));
    if let Some(content) = content {
        globals.insert("content".into(), Value::scalar(content.to_string()));
    }
    globals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_with_date(date: &str) -> Object {
        let mut page = Object::new();
        page.insert("date".into(), Value::scalar(date.to_string()));
        page.insert("permalink".into(), Value::scalar("/about/"));
        page
    }

    #[test]
    fn test_format_filter_with_pattern_and_default() {
        let config = Config::default();
        let parser = create_parser(&config, Vec::new()).unwrap();
        let globals = create_globals(&Object::new(), &page_with_date("2020-01-02T00:00:00-07:00"), None);

        let out = render_liquid(&parser, "{{ page.date | format: \"%Y/%m\" }}|{{ page.date | format }}", &globals).unwrap();
        assert_eq!(out, "2020/01|2 January 2020");
    }

    #[test]
    fn test_absolute_url_filter() {
        let config = Config::default();
        let parser = create_parser(&config, Vec::new()).unwrap();
        let globals = create_globals(&Object::new(), &page_with_date("2020-01-02"), None);

        let out = render_liquid(&parser, "{{ page.permalink | absolute_url }}", &globals).unwrap();
        assert_eq!(out, "http://localhost:4000/about/");
    }

    #[test]
    fn test_markdownify_filter() {
        let config = Config::default();
        let parser = create_parser(&config, Vec::new()).unwrap();
        let mut page = page_with_date("2020-01-02");
        page.insert("summary".into(), Value::scalar("Some *emphasis*"));
        let globals = create_globals(&Object::new(), &page, None);

        let out = render_liquid(&parser, "{{ page.summary | markdownify }}", &globals).unwrap();
        assert_eq!(out, "<p>Some <em>emphasis</em></p>\n");
    }

    #[test]
    fn test_templates_are_includable() {
        let config = Config::default();
        let parser = create_parser(&config, vec![("nav.html", "<nav>{{ page.permalink }}</nav>")]).unwrap();
        let globals = create_globals(&Object::new(), &page_with_date("2020-01-02"), Some("body"));

        let out = render_liquid(&parser, "{% include 'nav.html' %}{{ content }}", &globals).unwrap();
        assert_eq!(out, "<nav>/about/</nav>body");
    }

    #[test]
    fn test_syntax_error_is_template_error() {
        let config = Config::default();
        let parser = create_parser(&config, Vec::new()).unwrap();

        match render_liquid(&parser, "{% if %}", &Object::new()) {
            Err(SiteError::Template(_)) => {}
            other => panic!("expected template error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_partial_fails_render() {
        let config = Config::default();
        let parser = create_parser(&config, Vec::new()).unwrap();

        assert!(render_liquid(&parser, "{% include 'nope.html' %}", &Object::new()).is_err());
    }
}
