use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use super::deserializers::deserialize_scalar_string;

/// Front matter of a content file.
///
/// The named fields are the ones the pipeline reads or computes defaults for;
/// every other key is kept in `extra` and exposed to templates unchanged.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct FrontMatter {
    /// Page title
    #[serde(default, deserialize_with = "deserialize_scalar_string")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "deserialize_scalar_string")]
    pub subtitle: Option<String>,

    #[serde(default, deserialize_with = "deserialize_scalar_string")]
    pub description: Option<String>,

    /// Publication date as written (ISO-8601 date or timestamp)
    #[serde(default, deserialize_with = "deserialize_scalar_string")]
    pub date: Option<String>,

    /// Template file name under the templates directory
    #[serde(default)]
    pub template: Option<String>,

    /// External link an article points at
    #[serde(default)]
    pub link: Option<String>,

    /// Explicit permalink overriding the derived one
    #[serde(default)]
    pub permalink: Option<String>,

    /// Any other keys
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse a YAML metadata block
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        if yaml.trim().is_empty() {
            return Ok(FrontMatter::default());
        }

        serde_yaml::from_str(yaml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_and_extra_fields() {
        let fm = FrontMatter::from_yaml(
            "title: Hello\ndate: 2020-01-01\ntags: [a, b]\ntemplate: index.html\n",
        )
        .unwrap();

        assert_eq!(fm.title.as_deref(), Some("Hello"));
        assert_eq!(fm.date.as_deref(), Some("2020-01-01"));
        assert_eq!(fm.template.as_deref(), Some("index.html"));
        assert!(fm.extra.contains_key("tags"));
        assert!(!fm.extra.contains_key("title"));
    }

    #[test]
    fn test_numeric_title_becomes_string() {
        let fm = FrontMatter::from_yaml("title: 1999\n").unwrap();
        assert_eq!(fm.title.as_deref(), Some("1999"));
    }

    #[test]
    fn test_empty_block() {
        assert_eq!(FrontMatter::from_yaml("  \n").unwrap(), FrontMatter::default());
    }

    #[test]
    fn test_non_mapping_is_an_error() {
        assert!(FrontMatter::from_yaml("- just\n- a list\n").is_err());
    }
}
