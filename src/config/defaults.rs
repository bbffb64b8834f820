use std::path::PathBuf;

/// Environment variable that switches the build into production mode
pub const PRODUCTION_ENV_VAR: &str = "SITE_ENV";

/// Configuration file names to look for, in order
pub const CONFIG_FILES: [&str; 3] = ["_config.yml", "_config.yaml", "_config.toml"];

/// Default source directory
pub fn default_source() -> PathBuf {
    PathBuf::from(".")
}

/// Default build output directory
pub fn default_destination() -> PathBuf {
    PathBuf::from("build")
}

pub fn default_articles_dir() -> PathBuf {
    PathBuf::from("articles")
}

pub fn default_pages_dir() -> PathBuf {
    PathBuf::from("pages")
}

pub fn default_templates_dir() -> PathBuf {
    PathBuf::from("templates")
}

pub fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

pub fn default_title() -> String {
    "Untitled".to_string()
}

/// Default HTTP port for the dev server
pub fn default_port() -> u16 {
    4000
}

/// Default port advertised for live-reload clients
pub fn default_livereload_port() -> u16 {
    35729
}

pub fn default_ui_port() -> u16 {
    3001
}

pub fn default_timezone() -> String {
    "America/Phoenix".to_string()
}

/// Fixed UTC offset used when deriving article dates
pub fn default_utc_offset() -> String {
    "-07:00".to_string()
}

/// strftime pattern used by the `format` filter when no pattern is given
pub fn default_date_format() -> String {
    "%-d %B %Y".to_string()
}

pub fn default_article_template() -> String {
    "article.html".to_string()
}

pub fn default_page_template() -> String {
    "page.html".to_string()
}

pub fn default_markdown_ext() -> Vec<String> {
    vec!["md".to_string(), "markdown".to_string()]
}

/// Whether the environment asks for a production build
pub fn production_from_env() -> bool {
    std::env::var(PRODUCTION_ENV_VAR)
        .map(|v| v.eq_ignore_ascii_case("production"))
        .unwrap_or(false)
}
