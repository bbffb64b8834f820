use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

use crate::builder::page::model::{Section, SourceFile};
use crate::config::Config;
use crate::utils::error::SiteError;

/// Collect source files: articles first, then pages, each sorted by name.
///
/// Only the top level of each directory is read. Hidden files are skipped.
/// A missing directory contributes nothing.
pub fn collect_sources(config: &Config) -> Result<Vec<SourceFile>, SiteError> {
    debug!("Collecting sources...");
    let mut sources = Vec::new();

    let roots = [
        (config.articles_path(), &config.articles_dir, Section::Article),
        (config.pages_path(), &config.pages_dir, Section::Page),
    ];

    for (root, configured, section) in roots {
        if !root.is_dir() {
            warn!("Content directory {} does not exist, skipping", root.display());
            continue;
        }

        let walker = WalkDir::new(&root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry.map_err(|e| SiteError::Io(e.into()))?;
            if !entry.file_type().is_file() || is_hidden(entry.path()) {
                continue;
            }

            let path = entry.path().to_path_buf();
            let relative_path = relative_to_site(&path, &config.source, configured);
            let bytes = fs::read(&path)?;

            sources.push(SourceFile {
                path,
                relative_path,
                section,
                bytes,
            });
        }
    }

    debug!("Collected {} sources", sources.len());

    Ok(sources)
}

/// Path relative to the site root; files outside it fall back to
/// `<configured dir>/<file name>`
fn relative_to_site(path: &Path, source: &Path, configured: &Path) -> PathBuf {
    if let Ok(relative) = path.strip_prefix(source) {
        return relative.to_path_buf();
    }

    let dir = configured.file_name().map(PathBuf::from).unwrap_or_default();
    match path.file_name() {
        Some(name) => dir.join(name),
        None => dir,
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_collect_sources_order_and_filtering() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("articles/nested")).unwrap();
        fs::create_dir_all(root.join("pages")).unwrap();
        fs::write(root.join("articles/2020-02-01-b.md"), "b").unwrap();
        fs::write(root.join("articles/2020-01-01-a.md"), "a").unwrap();
        fs::write(root.join("articles/nested/deep.md"), "deep").unwrap();
        fs::write(root.join("articles/.DS_Store"), "junk").unwrap();
        fs::write(root.join("pages/about.md"), "about").unwrap();

        let config = Config {
            source: root.to_path_buf(),
            ..Config::default()
        };

        let sources = collect_sources(&config).unwrap();
        let names: Vec<String> = sources
            .iter()
            .map(|s| crate::utils::fs::to_slash(&s.relative_path))
            .collect();

        assert_eq!(
            names,
            vec![
                "articles/2020-01-01-a.md",
                "articles/2020-02-01-b.md",
                "pages/about.md"
            ]
        );
        assert_eq!(sources[0].section, Section::Article);
        assert_eq!(sources[2].section, Section::Page);
        assert_eq!(sources[2].bytes, b"about");
    }

    #[test]
    fn test_missing_directories() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            source: dir.path().to_path_buf(),
            ..Config::default()
        };

        assert!(collect_sources(&config).unwrap().is_empty());
    }
}
