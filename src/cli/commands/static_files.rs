use log::info;

use crate::config::Config;
use crate::directory;
use crate::utils::error::BoxResult;

/// Handle the static command
pub fn handle_static_command(config: &Config) -> BoxResult<()> {
    let copied = directory::copy_static(config)?;
    info!("Copied {} static file(s)", copied);
    Ok(())
}
