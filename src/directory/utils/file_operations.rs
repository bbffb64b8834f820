use std::io;
use std::path::Path;

use log::{debug, warn};
use walkdir::WalkDir;

use crate::utils::fs::copy_file;

/// Copy every file under `source` into `destination`, keeping relative paths.
///
/// Dot files are copied too. A missing source copies nothing.
pub fn copy_static_files(source: &Path, destination: &Path) -> io::Result<usize> {
    if !source.is_dir() {
        warn!("Static directory {} does not exist, skipping", source.display());
        return Ok(0);
    }

    let mut copied_count = 0;

    for entry in WalkDir::new(source).follow_links(true) {
        let entry = entry.map_err(io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if let Ok(rel_path) = path.strip_prefix(source) {
            let target = destination.join(rel_path);
            debug!("Copying {} to {}", path.display(), target.display());
            copy_file(path, &target)?;
            copied_count += 1;
        }
    }

    Ok(copied_count)
}
