mod build;
mod clean;
mod pages;
mod serve;
mod static_files;

pub use build::handle_build_command;
pub use clean::handle_clean_command;
pub use pages::handle_pages_command;
pub use serve::handle_serve_command;
pub use static_files::handle_static_command;

use std::env;
use std::path::{Path, PathBuf};

use log::info;

use crate::builder::BuildReport;
use crate::cli::types::Cli;
use crate::config::{self, Config, PRODUCTION_ENV_VAR};
use crate::utils::error::{BoxResult, SiteError};

/// Load the site configuration and apply command-line overrides
pub fn load_site_config(cli: &Cli) -> Result<Config, SiteError> {
    let source = cli.source.clone().unwrap_or_else(|| PathBuf::from("."));
    let config_files = if cli.config.is_empty() {
        None
    } else {
        Some(cli.config.clone())
    };

    let mut config = config::load_config(&source, config_files)?;

    if let Some(destination) = &cli.destination {
        config.destination = from_working_dir(destination);
    }
    if cli.production {
        config.production = true;
    }
    if config.production {
        info!("Production mode (--production or {}=production)", PRODUCTION_ENV_VAR);
    }

    config::validate_config(&config)?;
    Ok(config)
}

/// Paths given on the command line are relative to where we were run,
/// not to the site root
fn from_working_dir(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}

/// Turn a finished build into the command's result
fn finish(report: BuildReport) -> BoxResult<()> {
    report.log_summary();
    if report.is_success() {
        Ok(())
    } else {
        Err(format!("{} file(s) failed to build", report.errors.len()).into())
    }
}
