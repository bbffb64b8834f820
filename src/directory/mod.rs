pub mod utils;

use log::info;

use crate::config::Config;

pub use utils::{clean_destination, copy_static_files};

/// Copy the static directory into the build root
pub fn copy_static(config: &Config) -> std::io::Result<usize> {
    let copied = copy_static_files(&config.static_path(), &config.destination_dir())?;
    info!("Copied {} static files", copied);
    Ok(copied)
}
