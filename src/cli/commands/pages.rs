use log::info;

use crate::builder::{self, BuildOptions};
use crate::config::Config;
use crate::utils::error::BoxResult;

use super::finish;

/// Handle the pages command
pub fn handle_pages_command(config: &Config) -> BoxResult<()> {
    info!("Rendering articles and pages...");
    let report = builder::build_pages(config, &BuildOptions::default())?;
    finish(report)
}
