use std::path::{Path, PathBuf};
use std::fs;
use log::debug;
use serde_yaml::{Mapping, Value};

use crate::config::defaults::{self, CONFIG_FILES};
use crate::config::types::Config;
use crate::config::validation;
use crate::utils::error::SiteError;

/// Load site configuration from config files.
///
/// Files are merged key by key in the order given, later files winning. When
/// `config_files` is `None`, the first `_config.*` file found in `source_dir`
/// is used. The `SITE_ENV=production` toggle is applied on top of the files.
pub fn load_config<P: AsRef<Path>>(
    source_dir: P,
    config_files: Option<Vec<PathBuf>>,
) -> Result<Config, SiteError> {
    let source_dir = source_dir.as_ref();

    let config_paths = match config_files {
        Some(paths) if !paths.is_empty() => paths,
        _ => find_default_config_file(source_dir).into_iter().collect(),
    };

    let mut merged = Mapping::new();
    if config_paths.is_empty() {
        debug!("No configuration files found, using defaults");
    }
    for path in &config_paths {
        debug!("Loading configuration from {}", path.display());
        merge_mapping(&mut merged, read_config_file(path)?);
    }

    let mut config: Config = serde_yaml::from_value(Value::Mapping(merged))
        .map_err(|e| SiteError::Config(format!("Invalid configuration: {}", e)))?;

    // A config file can't know where it was loaded from
    if config.source == defaults::default_source() {
        config.source = source_dir.to_path_buf();
    }

    if defaults::production_from_env() {
        config.production = true;
    }

    validation::validate_config(&config)?;

    debug!("Configuration loaded: {:?}", config);
    Ok(config)
}

/// Find the first default configuration file present in the source directory
fn find_default_config_file(source_dir: &Path) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|name| source_dir.join(name))
        .find(|path| path.is_file())
}

/// Read one configuration file into a YAML mapping
fn read_config_file(path: &Path) -> Result<Mapping, SiteError> {
    let content = fs::read_to_string(path).map_err(|e| {
        SiteError::Config(format!(
            "Failed to read configuration file {}: {}", path.display(), e
        ))
    })?;

    let ext = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let value = match ext.as_str() {
        "toml" => parse_toml_config(&content, path)?,
        "yml" | "yaml" | "" => parse_yaml_config(&content, path)?,
        other => {
            return Err(SiteError::Config(format!(
                "Unsupported configuration file format: {}", other
            )));
        }
    };

    match value {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Mapping::new()),
        _ => Err(SiteError::Config(format!(
            "Configuration file {} must contain a mapping", path.display()
        ))),
    }
}

/// Parse a YAML configuration file
fn parse_yaml_config(content: &str, path: &Path) -> Result<Value, SiteError> {
    serde_yaml::from_str::<Value>(content).map_err(|e| {
        SiteError::Config(format!(
            "Failed to parse YAML configuration ({}): {}", path.display(), e
        ))
    })
}

/// Parse a TOML configuration file
fn parse_toml_config(content: &str, path: &Path) -> Result<Value, SiteError> {
    let toml_value: toml::Value = toml::from_str(content).map_err(|e| {
        SiteError::Config(format!(
            "Failed to parse TOML configuration ({}): {}", path.display(), e
        ))
    })?;

    serde_yaml::to_value(toml_value).map_err(|e| {
        SiteError::Config(format!(
            "Failed to convert TOML configuration ({}): {}", path.display(), e
        ))
    })
}

/// Merge the top-level keys of `other` into `base`
fn merge_mapping(base: &mut Mapping, other: Mapping) {
    for (key, value) in other {
        base.insert(key, value);
    }
}
