use std::path::{Path, PathBuf};
use chrono::FixedOffset;
use serde::{Serialize, Deserialize};

use crate::config::defaults;

/// What to do when two pages resolve to the same output file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Fail the build and list every collision
    #[default]
    Error,
    /// Log a warning; the page processed last wins
    Warn,
}

/// Site configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site root containing the content directories
    pub source: PathBuf,

    /// Build output directory (relative paths resolve against `source`)
    pub destination: PathBuf,

    /// Directory of chronological articles
    pub articles_dir: PathBuf,

    /// Directory of standalone pages, served from the site root
    pub pages_dir: PathBuf,

    /// Directory of Liquid templates
    pub templates_dir: PathBuf,

    /// Directory copied verbatim into the build root
    pub static_dir: PathBuf,

    /// Site title
    pub title: String,

    /// Site subtitle
    pub subtitle: Option<String>,

    /// Public URL of the site, used as the base URL in production
    pub url: Option<String>,

    /// Dev server port
    pub port: u16,

    /// Live-reload port
    pub livereload_port: u16,

    /// Dev server UI port
    pub ui_port: u16,

    /// Timezone name exposed to templates
    pub timezone: String,

    /// Fixed offset matching `timezone`, e.g. "-07:00"
    pub utc_offset: String,

    /// Default strftime pattern for the `format` filter
    pub date_format: String,

    /// Template forced onto every article
    pub article_template: String,

    /// Template used by pages that don't name one
    pub default_template: String,

    /// Extensions rendered as Markdown
    pub markdown_ext: Vec<String>,

    /// Production build: minified output, public base URL
    pub production: bool,

    /// Abort on the first per-file error instead of collecting them
    pub fail_fast: bool,

    /// Handling of destination collisions
    pub on_collision: CollisionPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source: defaults::default_source(),
            destination: defaults::default_destination(),
            articles_dir: defaults::default_articles_dir(),
            pages_dir: defaults::default_pages_dir(),
            templates_dir: defaults::default_templates_dir(),
            static_dir: defaults::default_static_dir(),
            title: defaults::default_title(),
            subtitle: None,
            url: None,
            port: defaults::default_port(),
            livereload_port: defaults::default_livereload_port(),
            ui_port: defaults::default_ui_port(),
            timezone: defaults::default_timezone(),
            utc_offset: defaults::default_utc_offset(),
            date_format: defaults::default_date_format(),
            article_template: defaults::default_article_template(),
            default_template: defaults::default_page_template(),
            markdown_ext: defaults::default_markdown_ext(),
            production: false,
            fail_fast: false,
            on_collision: CollisionPolicy::default(),
        }
    }
}

impl Config {
    fn resolve(&self, dir: &Path) -> PathBuf {
        if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            self.source.join(dir)
        }
    }

    /// Absolute (or source-relative) build output root
    pub fn destination_dir(&self) -> PathBuf {
        self.resolve(&self.destination)
    }

    pub fn articles_path(&self) -> PathBuf {
        self.resolve(&self.articles_dir)
    }

    pub fn pages_path(&self) -> PathBuf {
        self.resolve(&self.pages_dir)
    }

    pub fn templates_path(&self) -> PathBuf {
        self.resolve(&self.templates_dir)
    }

    pub fn static_path(&self) -> PathBuf {
        self.resolve(&self.static_dir)
    }

    /// Base URL for absolute links
    pub fn base_url(&self) -> String {
        match (&self.url, self.production) {
            (Some(url), true) => url.trim_end_matches('/').to_string(),
            _ => format!("http://localhost:{}", self.port),
        }
    }

    /// Parsed `utc_offset`; validation guarantees it parses
    pub fn offset(&self) -> Option<FixedOffset> {
        parse_utc_offset(&self.utc_offset)
    }

    /// Check if a file should be rendered as Markdown
    pub fn is_markdown(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| {
                let ext = ext.to_string_lossy().to_lowercase();
                self.markdown_ext.iter().any(|md| md.to_lowercase() == ext)
            })
            .unwrap_or(false)
    }
}

/// Parse an offset such as "-07:00", "+0530" or "Z"
pub fn parse_utc_offset(value: &str) -> Option<FixedOffset> {
    let value = value.trim();
    if value == "Z" || value.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0);
    }

    let (sign, rest) = match value.chars().next()? {
        '+' => (1, &value[1..]),
        '-' => (-1, &value[1..]),
        _ => return None,
    };

    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_utc_offset() {
        assert_eq!(parse_utc_offset("-07:00"), FixedOffset::west_opt(7 * 3600));
        assert_eq!(parse_utc_offset("+0530"), FixedOffset::east_opt(5 * 3600 + 30 * 60));
        assert_eq!(parse_utc_offset("Z"), FixedOffset::east_opt(0));
        assert_eq!(parse_utc_offset("America/Phoenix"), None);
        assert_eq!(parse_utc_offset("+25:00"), None);
    }

    #[test]
    fn test_base_url_depends_on_production() {
        let mut config = Config {
            url: Some("https://example.net/".to_string()),
            ..Config::default()
        };
        assert_eq!(config.base_url(), "http://localhost:4000");

        config.production = true;
        assert_eq!(config.base_url(), "https://example.net");
    }

    #[test]
    fn test_is_markdown() {
        let config = Config::default();
        assert!(config.is_markdown(Path::new("pages/about.md")));
        assert!(config.is_markdown(Path::new("pages/about.MARKDOWN")));
        assert!(!config.is_markdown(Path::new("pages/atom.xml")));
    }

    #[test]
    fn test_directories_resolve_against_source() {
        let config = Config {
            source: PathBuf::from("/site"),
            ..Config::default()
        };
        assert_eq!(config.destination_dir(), PathBuf::from("/site/build"));
        assert_eq!(config.articles_path(), PathBuf::from("/site/articles"));
    }
}
