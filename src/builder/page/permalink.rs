use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use regex::Regex;

use crate::utils::fs::to_slash;

lazy_static! {
    static ref DATE_PREFIX_REGEX: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}-").unwrap();
}

/// Derive the public URL of a content file from its site-relative path.
///
/// `articles/2020-01-01-hello.md` becomes `/articles/hello/` and
/// `pages/about.md` becomes `/about/`. Files named `index` or `atom` keep
/// their file name: `index.md` becomes `index.html`, anything else keeps its
/// extension, and a trailing `index.html` is dropped from the URL.
///
/// `pages_root` is the site-relative directory whose prefix is removed.
pub fn permalink_for(relative_path: &Path, pages_root: &str, is_markdown: bool) -> String {
    let dir = relative_path.parent().unwrap_or_else(|| Path::new(""));
    let stem = relative_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let basename = DATE_PREFIX_REGEX.replace(&stem, "").into_owned();

    let output = if basename != "index" && basename != "atom" {
        dir.join(&basename).join("index.html")
    } else if is_markdown {
        dir.join(format!("{}.html", basename))
    } else {
        match relative_path.extension() {
            Some(ext) => dir.join(format!("{}.{}", basename, ext.to_string_lossy())),
            None => dir.join(&basename),
        }
    };

    let mut url = format!("/{}", to_slash(&output));

    let pages_prefix = format!("/{}/", pages_root.trim_matches('/'));
    if pages_prefix != "//" && url.starts_with(&pages_prefix) {
        url = format!("/{}", &url[pages_prefix.len()..]);
    }

    if url.ends_with("/index.html") {
        url.truncate(url.len() - "index.html".len());
    }

    url
}

/// Normalise an explicit permalink from front matter to start with `/`
pub fn normalize_permalink(permalink: &str) -> String {
    let permalink = permalink.trim();
    if permalink.starts_with('/') {
        permalink.to_string()
    } else {
        format!("/{}", permalink)
    }
}

/// Map a permalink to a file under the build root.
///
/// A URL ending in `/` maps to `index.html` inside that directory. `.` and
/// `..` segments are dropped so output never leaves the build root.
pub fn destination_for(permalink: &str, build_root: &Path) -> PathBuf {
    let mut path = build_root.to_path_buf();
    for segment in permalink.split('/') {
        if segment.is_empty() || segment == "." || segment == ".." {
            continue;
        }
        path.push(segment);
    }

    if permalink.is_empty() || permalink.ends_with('/') {
        path.push("index.html");
    }

    path
}

/// Output location of a pass-through file: its relative path with the pages
/// root removed
pub fn passthrough_destination(relative_path: &Path, pages_root: &str, build_root: &Path) -> PathBuf {
    let relative = relative_path
        .strip_prefix(pages_root.trim_matches('/'))
        .unwrap_or(relative_path);
    build_root.join(relative)
}
