use crate::config::Config;
use crate::server::{self, ServerConfig};
use crate::utils::error::BoxResult;

/// Handle the serve command
pub async fn handle_serve_command(
    config: &Config,
    host: &str,
    port: Option<u16>,
    no_livereload: bool,
) -> BoxResult<()> {
    let mut config = config.clone();
    if let Some(port) = port {
        // base_url follows the port outside production
        config.port = port;
    }

    let server_config = ServerConfig {
        address: host.to_string(),
        port: config.port,
        livereload: !no_livereload,
        livereload_port: config.livereload_port,
        ui_port: config.ui_port,
    };

    server::serve(&config, &server_config).await
}
