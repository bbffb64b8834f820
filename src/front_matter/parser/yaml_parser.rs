use crate::front_matter::types::FrontMatter;
use crate::utils::error::SiteError;

/// Result of splitting a content file
#[derive(Debug, Clone, PartialEq)]
pub struct Split<'a> {
    /// Parsed metadata, `None` when the file has no metadata block
    pub front_matter: Option<FrontMatter>,
    /// Content after the metadata block
    pub body: &'a str,
}

/// Split a leading `---` delimited YAML block from the body.
///
/// The block must start on the first line, after an optional byte order
/// mark. It closes at the first line that is
/// `---` or `...` (trailing whitespace allowed); the line break after the
/// closing delimiter belongs to the block.
pub fn split(content: &str) -> Result<Split<'_>, SiteError> {
    let unmarked = content.strip_prefix('\u{feff}').unwrap_or(content);
    let rest = match unmarked
        .strip_prefix("---\n")
        .or_else(|| unmarked.strip_prefix("---\r\n"))
    {
        Some(rest) => rest,
        None => {
            return Ok(Split {
                front_matter: None,
                body: content,
            })
        }
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let trimmed = line.trim_end();
        if trimmed == "---" || trimmed == "..." {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];

            let front_matter = FrontMatter::from_yaml(yaml)
                .map_err(|e| SiteError::FrontMatter(format!("invalid YAML: {}", e)))?;

            return Ok(Split {
                front_matter: Some(front_matter),
                body,
            });
        }
        offset += line.len();
    }

    Err(SiteError::FrontMatter(
        "metadata block is missing its closing `---`".to_string(),
    ))
}
