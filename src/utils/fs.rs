use std::fs;
use std::io;
use std::path::Path;

/// Create a directory and any parent directories if they don't exist
pub fn create_directory<P: AsRef<Path>>(path: P) -> io::Result<()> {
    fs::create_dir_all(path.as_ref())
}

/// Remove a directory and all its contents
pub fn remove_directory<P: AsRef<Path>>(path: P) -> io::Result<()> {
    if path.as_ref().is_dir() {
        fs::remove_dir_all(path.as_ref())?;
    }
    Ok(())
}

/// Write bytes to a file, creating parent directories as needed
pub fn write_file<P: AsRef<Path>>(path: P, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        create_directory(parent)?;
    }

    fs::write(path.as_ref(), contents)
}

/// Copy a file from source to destination, creating parent directories as needed
pub fn copy_file<P: AsRef<Path>, Q: AsRef<Path>>(from: P, to: Q) -> io::Result<u64> {
    if let Some(parent) = to.as_ref().parent() {
        create_directory(parent)?;
    }

    fs::copy(from, to)
}

/// Path rendered with forward slashes regardless of platform
pub fn to_slash<P: AsRef<Path>>(path: P) -> String {
    path.as_ref()
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
