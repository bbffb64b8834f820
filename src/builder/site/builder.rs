use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use rayon::prelude::*;

use crate::builder::page::{collect_sources, destination_for, passthrough_destination, ContentItem};
use crate::builder::site::context::Site;
use crate::builder::site::converter::site_to_liquid;
use crate::builder::site::loader::{load_templates, template_sources};
use crate::builder::site::output::{resolve_collisions, write_outputs, OutputFile, WriteOptions};
use crate::builder::site::processor::{pages_root, render_content, TemplateRenderer};
use crate::config::Config;
use crate::directory::{clean_destination, copy_static};
use crate::liquid::create_parser;
use crate::markdown::MarkdownRenderer;
use crate::utils::error::{BoxResult, PageError, SiteError};

/// Per-build settings that don't belong in the site configuration
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Timestamp exposed as `site.build_time`
    pub build_time: DateTime<Utc>,
    /// Event stream URL; when set, rendered HTML gets a live-reload client
    pub livereload: Option<String>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            build_time: Utc::now(),
            livereload: None,
        }
    }
}

/// Build statistics
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Rendered pages written
    pub pages_count: usize,
    /// Articles in the site listing
    pub articles_count: usize,
    /// Files without front matter copied through
    pub passthrough_count: usize,
    /// Files copied from the static directory
    pub static_files_count: usize,
    /// Files that failed, each with its own error
    pub errors: Vec<PageError>,
    pub duration: Duration,
}

impl BuildReport {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Log the summary line and every collected error
    pub fn log_summary(&self) {
        info!("Site built in {:.2?}", self.duration);
        info!(
            "Pages: {}, Articles: {}, Pass-through: {}, Static files: {}, Errors: {}",
            self.pages_count,
            self.articles_count,
            self.passthrough_count,
            self.static_files_count,
            self.errors.len()
        );
        for err in &self.errors {
            error!("{}", err);
        }
    }
}

/// Full build: clean, copy static files, then render every page
pub fn build_site(config: &Config, options: &BuildOptions) -> BoxResult<BuildReport> {
    let start_time = Instant::now();

    clean_destination(config)?;
    let static_files_count = copy_static(config)?;

    let mut report = build_pages(config, options)?;
    report.static_files_count = static_files_count;
    report.duration = start_time.elapsed();

    Ok(report)
}

/// Render and write all articles and pages.
///
/// The content stage runs file by file in discovery order and fills the
/// site's article listing. Only once every file has been through it does the
/// template stage start, so any page can list all articles.
pub fn build_pages(config: &Config, options: &BuildOptions) -> BoxResult<BuildReport> {
    let start_time = Instant::now();
    let mut report = BuildReport::default();

    let offset = config.offset().ok_or_else(|| {
        SiteError::Config(format!("invalid utc_offset `{}`", config.utc_offset))
    })?;
    let destination = config.destination_dir();
    info!("Output will be generated in: {}", destination.display());

    let sources = collect_sources(config)?;
    let markdown = MarkdownRenderer::new();
    let mut site = Site::new(config, offset, options.build_time);

    // Content stage
    let mut items = Vec::with_capacity(sources.len());
    for source in sources {
        match render_content(source, &mut site, &markdown, config) {
            Ok(item) => items.push(item),
            Err(e) => record_error(&mut report, e, config)?,
        }
    }
    report.articles_count = site.article_count();
    debug!("Content stage done, {} articles", report.articles_count);

    // Template stage
    let templates = load_templates(&config.templates_path())?;
    debug!("Loaded {} templates", templates.len());
    let parser = create_parser(
        config,
        template_sources(&templates),
    )?;
    let renderer = TemplateRenderer::new(&parser, &templates, &config.default_template);
    let site_data = site_to_liquid(&site);
    let pages_root = pages_root(config);

    let rendered: Vec<Result<OutputFile, PageError>> = items
        .into_par_iter()
        .map(|item| match item {
            ContentItem::Page(mut page) => match renderer.render(&mut page, &site_data) {
                Ok(html) => Ok(OutputFile {
                    destination: destination_for(&page.permalink, &destination),
                    source: page.path,
                    bytes: html.into_bytes(),
                    rendered: true,
                }),
                Err(e) => Err(PageError::new(&page.path, e)),
            },
            ContentItem::PassThrough(file) => Ok(OutputFile {
                destination: passthrough_destination(&file.relative_path, &pages_root, &destination),
                source: file.path,
                bytes: file.bytes,
                rendered: false,
            }),
        })
        .collect();

    let mut outputs = Vec::with_capacity(rendered.len());
    for result in rendered {
        match result {
            Ok(output) => outputs.push(output),
            Err(e) => record_error(&mut report, e, config)?,
        }
    }

    let outputs = resolve_collisions(outputs, config.on_collision)?;
    let write_options = WriteOptions {
        minify: config.production,
        livereload: options.livereload.clone().filter(|_| !config.production),
    };
    let written = write_outputs(outputs, &write_options);
    report.pages_count = written.rendered;
    report.passthrough_count = written.passed_through;
    for e in written.errors {
        record_error(&mut report, e, config)?;
    }

    report.duration = start_time.elapsed();
    Ok(report)
}

fn record_error(report: &mut BuildReport, err: PageError, config: &Config) -> BoxResult<()> {
    if config.fail_fast {
        return Err(Box::new(err));
    }

    warn!("Skipping {}", err);
    report.errors.push(err);
    Ok(())
}
