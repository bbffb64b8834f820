use std::error::Error;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Common result type for top-level plumbing
pub type BoxResult<T> = Result<T, Box<dyn Error>>;

/// Error types for site builds
#[derive(Debug)]
pub enum SiteError {
    /// IO error wrapper
    Io(io::Error),
    /// Configuration error
    Config(String),
    /// Front matter parsing error
    FrontMatter(String),
    /// Markdown processing error
    Markdown(String),
    /// Template parsing or rendering error
    Template(String),
    /// Content that cannot be turned into a page (e.g. an article without a date)
    Content(String),
    /// Two pages resolved to the same output file
    Collision(String),
}

impl fmt::Display for SiteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteError::Io(err) => write!(f, "IO error: {}", err),
            SiteError::Config(msg) => write!(f, "Configuration error: {}", msg),
            SiteError::FrontMatter(msg) => write!(f, "Front matter error: {}", msg),
            SiteError::Markdown(msg) => write!(f, "Markdown error: {}", msg),
            SiteError::Template(msg) => write!(f, "Template error: {}", msg),
            SiteError::Content(msg) => write!(f, "Content error: {}", msg),
            SiteError::Collision(msg) => write!(f, "Destination collision: {}", msg),
        }
    }
}

impl Error for SiteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SiteError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for SiteError {
    fn from(err: io::Error) -> Self {
        SiteError::Io(err)
    }
}

/// An error tied to the source file that produced it
#[derive(Debug)]
pub struct PageError {
    pub path: PathBuf,
    pub error: SiteError,
}

impl PageError {
    pub fn new<P: AsRef<Path>>(path: P, error: SiteError) -> Self {
        PageError {
            path: path.as_ref().to_path_buf(),
            error,
        }
    }
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.error)
    }
}

impl Error for PageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_error_display_includes_path() {
        let err = PageError::new(
            "pages/about.md",
            SiteError::Template("unknown template `nope.html`".to_string()),
        );

        assert_eq!(
            err.to_string(),
            "pages/about.md: Template error: unknown template `nope.html`"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let err: SiteError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, SiteError::Io(_)));
        assert!(err.source().is_some());
    }
}
