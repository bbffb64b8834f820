use log::info;

use crate::builder::{self, BuildOptions};
use crate::config::Config;
use crate::utils::error::BoxResult;

use super::finish;

/// Handle the build command: clean, copy static files, render pages
pub fn handle_build_command(config: &Config) -> BoxResult<()> {
    info!("Building site into {}...", config.destination_dir().display());
    let report = builder::build_site(config, &BuildOptions::default())?;
    finish(report)
}
