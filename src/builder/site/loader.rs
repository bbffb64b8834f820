use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::{debug, warn};
use walkdir::WalkDir;

use crate::front_matter::split;
use crate::utils::error::SiteError;
use crate::utils::fs::to_slash;

/// A template with its optional parent layout
#[derive(Debug, Clone)]
pub struct TemplateInfo {
    /// Template body, or why its front matter could not be read
    pub source: Result<String, String>,
    /// `layout:` from the template's own front matter
    pub layout: Option<String>,
}

/// Templates by name, the path relative to the templates directory
pub type Templates = BTreeMap<String, TemplateInfo>;

/// Name and body of every readable template, for partial registration
pub fn template_sources(templates: &Templates) -> impl Iterator<Item = (&str, &str)> {
    templates.iter().filter_map(|(name, info)| {
        info.source
            .as_ref()
            .ok()
            .map(|source| (name.as_str(), source.as_str()))
    })
}

/// Load every file under the templates directory
pub fn load_templates(templates_dir: &Path) -> Result<Templates, SiteError> {
    let mut templates = Templates::new();

    if !templates_dir.is_dir() {
        warn!("Templates directory {} does not exist", templates_dir.display());
        return Ok(templates);
    }

    for entry in WalkDir::new(templates_dir).sort_by_file_name() {
        let entry = entry.map_err(|e| SiteError::Io(e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let name = match path.strip_prefix(templates_dir) {
            Ok(relative) => to_slash(relative),
            Err(_) => continue,
        };

        let content = fs::read_to_string(path)?;
        // A broken template only fails the pages that reach it
        let info = match split(&content) {
            Ok(parsed) => TemplateInfo {
                layout: parsed
                    .front_matter
                    .as_ref()
                    .and_then(|fm| fm.extra.get("layout"))
                    .and_then(|value| value.as_str())
                    .map(str::to_string),
                source: Ok(parsed.body.to_string()),
            },
            Err(e) => {
                warn!("Template {} is unusable: {}", name, e);
                TemplateInfo {
                    source: Err(e.to_string()),
                    layout: None,
                }
            }
        };

        debug!("Loaded template {}", name);
        templates.insert(name, info);
    }

    Ok(templates)
}
