pub mod commands;
pub mod logging;
pub mod types;

use clap::Parser;
use log::error;

use crate::utils::error::BoxResult;
use types::{Cli, Commands};

/// Run the command-line interface, exiting non-zero on failure
pub async fn run() {
    let cli = Cli::parse();

    logging::init_logging(cli.debug);

    if let Err(e) = dispatch(&cli).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn dispatch(cli: &Cli) -> BoxResult<()> {
    let config = commands::load_site_config(cli)?;

    match cli.command.clone().unwrap_or(Commands::Build) {
        Commands::Clean => commands::handle_clean_command(&config),
        Commands::Pages => commands::handle_pages_command(&config),
        Commands::Static => commands::handle_static_command(&config),
        Commands::Build => commands::handle_build_command(&config),
        Commands::Serve { host, port, no_livereload } => {
            commands::handle_serve_command(&config, &host, port, no_livereload).await
        }
    }
}
