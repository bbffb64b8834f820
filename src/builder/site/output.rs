use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

use log::{debug, warn};

use crate::config::CollisionPolicy;
use crate::utils::error::{PageError, SiteError};
use crate::utils::fs::write_file;

/// A file ready to be written to the build root
#[derive(Debug, Clone)]
pub struct OutputFile {
    /// Content file it was produced from
    pub source: PathBuf,
    pub destination: PathBuf,
    pub bytes: Vec<u8>,
    /// False for pass-through files, which are written unchanged
    pub rendered: bool,
}

impl OutputFile {
    fn is_html(&self) -> bool {
        self.rendered
            && self
                .destination
                .extension()
                .map(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"))
                .unwrap_or(false)
    }
}

/// Detect outputs sharing a destination.
///
/// With [`CollisionPolicy::Error`] any collision fails the build before
/// anything is written. With [`CollisionPolicy::Warn`] the output processed
/// last wins.
pub fn resolve_collisions(
    outputs: Vec<OutputFile>,
    policy: CollisionPolicy,
) -> Result<Vec<OutputFile>, SiteError> {
    let mut claims: HashMap<PathBuf, Vec<PathBuf>> = HashMap::new();
    for output in &outputs {
        claims
            .entry(output.destination.clone())
            .or_default()
            .push(output.source.clone());
    }

    let mut collisions: Vec<String> = claims
        .iter()
        .filter(|(_, sources)| sources.len() > 1)
        .map(|(destination, sources)| {
            let sources: Vec<String> = sources.iter().map(|s| s.display().to_string()).collect();
            format!("{} <- {}", destination.display(), sources.join(", "))
        })
        .collect();

    if collisions.is_empty() {
        return Ok(outputs);
    }
    collisions.sort();

    match policy {
        CollisionPolicy::Error => Err(SiteError::Collision(collisions.join("; "))),
        CollisionPolicy::Warn => {
            for collision in &collisions {
                warn!("Destination collision, last one wins: {}", collision);
            }

            let mut last_index: HashMap<PathBuf, usize> = HashMap::new();
            for (index, output) in outputs.iter().enumerate() {
                last_index.insert(output.destination.clone(), index);
            }

            Ok(outputs
                .into_iter()
                .enumerate()
                .filter(|(index, output)| last_index.get(&output.destination) == Some(index))
                .map(|(_, output)| output)
                .collect())
        }
    }
}

/// Minify rendered HTML
pub fn minify(html: &[u8]) -> Vec<u8> {
    let cfg = minify_html::Cfg {
        keep_closing_tags: true,
        keep_html_and_head_opening_tags: true,
        minify_css: true,
        minify_js: true,
        ..minify_html::Cfg::default()
    };
    minify_html::minify(html, &cfg)
}

/// Insert a client for the event stream at `url` before the last `</body>`,
/// or append it
pub fn inject_livereload(html: &str, url: &str) -> String {
    let script = format!(
        "<script>new EventSource(\"{}\").onmessage=function(){{location.reload()}};</script>",
        url
    );

    match html.rfind("</body>") {
        Some(index) => format!("{}{}{}", &html[..index], script, &html[index..]),
        None => format!("{}{}", html, script),
    }
}

/// Post-processing applied while writing
#[derive(Debug, Clone, Default)]
pub struct WriteOptions {
    pub minify: bool,
    /// Event stream URL for the injected live-reload client
    pub livereload: Option<String>,
}

/// What a write pass produced
#[derive(Debug, Default)]
pub struct WriteSummary {
    /// Rendered pages written
    pub rendered: usize,
    /// Pass-through files written
    pub passed_through: usize,
    /// Outputs that could not be written, tagged with their source file
    pub errors: Vec<PageError>,
}

/// Write outputs, transforming rendered HTML as requested.
///
/// A failed write is recorded against its source file and the remaining
/// outputs are still written.
pub fn write_outputs(outputs: Vec<OutputFile>, options: &WriteOptions) -> WriteSummary {
    let mut summary = WriteSummary::default();

    for output in outputs {
        let is_html = output.is_html();
        let mut bytes = output.bytes;

        if is_html && options.minify {
            bytes = minify(&bytes);
        }
        if let (true, Some(url)) = (is_html, &options.livereload) {
            bytes = inject_livereload(&String::from_utf8_lossy(&bytes), url).into_bytes();
        }

        if let Err(e) = write_file(&output.destination, &bytes) {
            let error = io::Error::new(
                e.kind(),
                format!("failed to write {}: {}", output.destination.display(), e),
            );
            summary.errors.push(PageError::new(&output.source, SiteError::Io(error)));
            continue;
        }

        debug!("Generated {}", output.destination.display());
        if output.rendered {
            summary.rendered += 1;
        } else {
            summary.passed_through += 1;
        }
    }

    summary
}
