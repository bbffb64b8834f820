use std::collections::BTreeMap;
use std::path::{Component, PathBuf};

use liquid::{Object, Parser, Template};
use log::debug;

use crate::builder::page::{
    call_to_action, date_from_file_name, extract_excerpt, normalize_permalink, permalink_for,
    ContentItem, Page, PassThrough, SourceFile,
};
use crate::builder::site::context::Site;
use crate::builder::site::converter::page_to_liquid;
use crate::builder::site::loader::Templates;
use crate::config::Config;
use crate::front_matter::split;
use crate::liquid::{create_globals, render_liquid};
use crate::markdown::MarkdownRenderer;
use crate::utils::error::{PageError, SiteError};
use crate::utils::fs::to_slash;

/// Site-relative pages directory, whose prefix is dropped from permalinks
pub fn pages_root(config: &Config) -> String {
    if config.pages_dir.is_absolute() {
        config
            .pages_dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    } else {
        let normal: PathBuf = config
            .pages_dir
            .components()
            .filter(|component| !matches!(component, Component::CurDir))
            .collect();
        to_slash(normal)
    }
}

/// Content stage for one source file.
///
/// Files without front matter (or that are not UTF-8) pass through as-is.
/// Everything else becomes a [`Page`]: Markdown is rendered, and articles
/// gain a date, an excerpt and a link before being added to `site`.
pub fn render_content(
    source: SourceFile,
    site: &mut Site,
    markdown: &MarkdownRenderer,
    config: &Config,
) -> Result<ContentItem, PageError> {
    let SourceFile { path, relative_path, section, bytes } = source;

    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            return Ok(ContentItem::PassThrough(PassThrough {
                path,
                relative_path,
                bytes: e.into_bytes(),
            }))
        }
    };

    let parsed = split(&text).map_err(|e| PageError::new(&path, e))?;
    let front_matter = match parsed.front_matter {
        Some(front_matter) => front_matter,
        None => {
            return Ok(ContentItem::PassThrough(PassThrough {
                path,
                relative_path,
                bytes: text.into_bytes(),
            }))
        }
    };

    let is_markdown = config.is_markdown(&path);
    let permalink = match &front_matter.permalink {
        Some(permalink) => normalize_permalink(permalink),
        None => permalink_for(&relative_path, &pages_root(config), is_markdown),
    };

    let contents = if is_markdown {
        Some(markdown.render(parsed.body).map_err(|e| PageError::new(&path, e))?)
    } else {
        None
    };
    let body = contents.clone().unwrap_or_else(|| parsed.body.to_string());

    let mut page = Page {
        template: front_matter.template.clone(),
        date: front_matter.date.clone(),
        link: front_matter.link.clone(),
        path,
        relative_path,
        section,
        front_matter,
        permalink,
        contents,
        excerpt: None,
        body,
        content: None,
    };

    if page.is_article() {
        complete_article(&mut page, site)?;
        site.add_article(page.clone());
    }

    debug!("Rendered content of {}", page.path.display());
    Ok(ContentItem::Page(page))
}

/// Fill in the computed article fields: template, date, excerpt and link
fn complete_article(page: &mut Page, site: &Site) -> Result<(), PageError> {
    page.template = Some(site.article_template.clone());

    if page.date.is_none() {
        let stem = page
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        match date_from_file_name(&stem, &site.utc_offset) {
            Some(date) => page.date = Some(date),
            None => {
                return Err(PageError::new(
                    &page.path,
                    SiteError::Content(
                        "article has no `date` and its file name has no YYYY-MM-DD".to_string(),
                    ),
                ))
            }
        }
    }

    let external = page.link.is_some();
    let mut excerpt = if external {
        page.body.clone()
    } else {
        extract_excerpt(&page.body)
    };
    excerpt.push_str(&call_to_action(&page.permalink, page.title(), external));
    page.excerpt = Some(excerpt);

    if page.link.is_none() {
        page.link = Some(page.permalink.clone());
    }

    Ok(())
}

struct CompiledTemplate {
    template: Result<Template, String>,
    layout: Option<String>,
}

/// Template stage: renders page bodies and wraps them in their template and
/// its layout chain.
///
/// Templates are compiled once; a template that fails to compile only fails
/// the pages that use it.
pub struct TemplateRenderer<'a> {
    parser: &'a Parser,
    compiled: BTreeMap<String, CompiledTemplate>,
    default_template: String,
}

impl<'a> TemplateRenderer<'a> {
    pub fn new(parser: &'a Parser, templates: &Templates, default_template: &str) -> Self {
        let compiled = templates
            .iter()
            .map(|(name, info)| {
                let template = info
                    .source
                    .clone()
                    .and_then(|source| parser.parse(&source).map_err(|e| e.to_string()));
                (
                    name.clone(),
                    CompiledTemplate {
                        template,
                        layout: info.layout.clone(),
                    },
                )
            })
            .collect();

        TemplateRenderer {
            parser,
            compiled,
            default_template: default_template.to_string(),
        }
    }

    /// Render a page's final output
    pub fn render(&self, page: &mut Page, site: &Object) -> Result<String, SiteError> {
        let globals = create_globals(site, &page_to_liquid(page), None);
        let body = render_liquid(self.parser, &page.body, &globals)?;
        page.content = Some(body.clone());

        let page_obj = page_to_liquid(page);
        let mut name = page
            .template
            .clone()
            .unwrap_or_else(|| self.default_template.clone());
        let mut chain: Vec<String> = Vec::new();
        let mut output = body;

        loop {
            if chain.contains(&name) {
                chain.push(name);
                return Err(SiteError::Template(format!(
                    "layout cycle: {}",
                    chain.join(" -> ")
                )));
            }

            let compiled = self.compiled.get(&name).ok_or_else(|| {
                SiteError::Template(format!("template `{}` not found", name))
            })?;
            let template = compiled
                .template
                .as_ref()
                .map_err(|e| SiteError::Template(format!("{}: {}", name, e)))?;

            let globals = create_globals(site, &page_obj, Some(&output));
            output = template
                .render(&globals)
                .map_err(|e| SiteError::Template(format!("{}: {}", name, e)))?;

            match &compiled.layout {
                Some(layout) => {
                    chain.push(name);
                    name = layout.clone();
                }
                None => break,
            }
        }

        Ok(output)
    }
}
