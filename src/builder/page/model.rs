use std::path::PathBuf;

use crate::front_matter::FrontMatter;

/// Which content root a source file was discovered under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Article,
    Page,
}

/// A discovered content file, before any processing
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path on disk
    pub path: PathBuf,
    /// Path relative to the site root, e.g. `articles/2020-01-01-a.md`
    pub relative_path: PathBuf,
    pub section: Section,
    pub bytes: Vec<u8>,
}

/// A content file with front matter, carried through both rendering passes
#[derive(Debug, Clone)]
pub struct Page {
    pub path: PathBuf,
    pub relative_path: PathBuf,
    pub section: Section,
    pub front_matter: FrontMatter,
    pub permalink: String,
    /// Template to render with; `None` falls back to the site default
    pub template: Option<String>,
    pub date: Option<String>,
    pub link: Option<String>,
    /// Rendered Markdown, before any template pass
    pub contents: Option<String>,
    pub excerpt: Option<String>,
    /// Working body fed to the template pass
    pub body: String,
    /// Final output after the template pass
    pub content: Option<String>,
}

impl Page {
    pub fn title(&self) -> Option<&str> {
        self.front_matter.title.as_deref()
    }

    pub fn is_article(&self) -> bool {
        self.section == Section::Article
    }
}

/// A content file without front matter, copied through untouched
#[derive(Debug, Clone)]
pub struct PassThrough {
    pub path: PathBuf,
    pub relative_path: PathBuf,
    pub bytes: Vec<u8>,
}

/// Result of the content stage for a single file
#[derive(Debug, Clone)]
pub enum ContentItem {
    Page(Page),
    PassThrough(PassThrough),
}
