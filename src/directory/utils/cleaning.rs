use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;

use crate::config::Config;
use crate::utils::fs::remove_directory;

/// Remove the build output root.
///
/// Refuses to remove a directory that contains the site source.
pub fn clean_destination(config: &Config) -> io::Result<()> {
    let destination = config.destination_dir();

    if !destination.exists() {
        return Ok(());
    }

    let source = canonical(&config.source);
    if source.starts_with(canonical(&destination)) {
        return Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            format!(
                "refusing to clean {}: it contains the site source",
                destination.display()
            ),
        ));
    }

    info!("Cleaning destination directory: {}", destination.display());
    remove_directory(&destination)
}

fn canonical(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_clean_removes_build_root() {
        let dir = TempDir::new().unwrap();
        let build = dir.path().join("build");
        fs::create_dir_all(build.join("nested")).unwrap();
        fs::write(build.join("nested/index.html"), "x").unwrap();

        let config = Config {
            source: dir.path().to_path_buf(),
            ..Config::default()
        };
        clean_destination(&config).unwrap();

        assert!(!build.exists());
        assert!(dir.path().exists());
    }

    #[test]
    fn test_clean_missing_is_ok() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            source: dir.path().to_path_buf(),
            ..Config::default()
        };
        clean_destination(&config).unwrap();
    }

    #[test]
    fn test_clean_refuses_source_ancestor() {
        let dir = TempDir::new().unwrap();
        let site = dir.path().join("site");
        fs::create_dir_all(&site).unwrap();

        let config = Config {
            source: site.clone(),
            destination: dir.path().to_path_buf(),
            ..Config::default()
        };

        assert!(clean_destination(&config).is_err());
        assert!(site.exists());
    }
}
