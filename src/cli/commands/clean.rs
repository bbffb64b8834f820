use log::info;

use crate::config::Config;
use crate::directory;
use crate::utils::error::BoxResult;

/// Handle the clean command
pub fn handle_clean_command(config: &Config) -> BoxResult<()> {
    info!("Cleaning {}", config.destination_dir().display());
    directory::clean_destination(config)?;
    info!("Site cleaned successfully");
    Ok(())
}
