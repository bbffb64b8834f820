use log::warn;

use crate::config::types::{parse_utc_offset, Config};
use crate::utils::error::SiteError;

/// Validate the configuration
pub fn validate_config(config: &Config) -> Result<(), SiteError> {
    if config.destination.as_os_str().is_empty() {
        return Err(SiteError::Config("destination must not be empty".to_string()));
    }

    // Building into the source root would wipe it on clean
    if config.destination_dir() == config.source {
        return Err(SiteError::Config(format!(
            "destination must differ from the source directory: {}",
            config.source.display()
        )));
    }

    if parse_utc_offset(&config.utc_offset).is_none() {
        return Err(SiteError::Config(format!(
            "utc_offset `{}` is not an offset like -07:00", config.utc_offset
        )));
    }

    if config.markdown_ext.is_empty() {
        warn!("No markdown extensions configured; Markdown will not be rendered");
    }

    if config.production && config.url.is_none() {
        warn!("Production build without `url`; falling back to {}", config.base_url());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_destination_equal_to_source_is_rejected() {
        let config = Config {
            source: PathBuf::from("/site"),
            destination: PathBuf::from("/site"),
            ..Config::default()
        };
        assert!(validate_config(&config).is_err());
    }
}
