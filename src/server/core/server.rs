use std::net::SocketAddr;
use std::sync::mpsc::channel;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::{error, info, warn};
use tokio::signal;

use crate::builder::{build_site, handle_changes, watch_site, BuildOptions};
use crate::config::Config;
use crate::server::app::{create_app, create_livereload_app, create_status_app};
use crate::server::config::ServerConfig;
use crate::server::handlers::{BuildStatus, SharedStatus};
use crate::server::livereload::LiveReload;
use crate::utils::error::BoxResult;

/// Quiet period before a batch of changes is rebuilt
const REBUILD_DEBOUNCE: Duration = Duration::from_millis(200);

/// Build the site, then serve it while rebuilding on changes.
///
/// The site, the live-reload stream and the status page each get their own
/// listener. Live reload is never enabled for production builds.
pub async fn serve(config: &Config, server_config: &ServerConfig) -> BoxResult<()> {
    let livereload_enabled = server_config.livereload && !config.production;
    if server_config.livereload && config.production {
        warn!("Live reload is disabled for production builds");
    }

    let options = BuildOptions {
        livereload: livereload_enabled.then(|| server_config.livereload_url()),
        ..BuildOptions::default()
    };

    let status: SharedStatus = Arc::new(Mutex::new(BuildStatus::default()));

    info!("Building site before serving...");
    match build_site(config, &options) {
        Ok(report) => {
            report.log_summary();
            if let Ok(mut status) = status.lock() {
                status.record(&report);
            }
        }
        Err(e) => {
            error!("Failed to build site: {}", e);
            warn!("Serving the previous output anyway");
        }
    }

    let livereload = LiveReload::new();

    let (tx, rx) = channel();
    let _watcher = watch_site(config, tx)?;

    let watch_config = config.clone();
    let watch_status = status.clone();
    let watch_livereload = livereload.clone();
    std::thread::spawn(move || {
        handle_changes(rx, &watch_config, &options, REBUILD_DEBOUNCE, |report| {
            if let Ok(mut status) = watch_status.lock() {
                status.record(report);
            }
            if livereload_enabled {
                watch_livereload.trigger();
            }
        });
    });

    let destination = config.destination_dir();
    info!("Serving files from {}", destination.display());

    let site_addr: SocketAddr = server_config.address_string(server_config.port).parse()?;
    let ui_addr: SocketAddr = server_config.address_string(server_config.ui_port).parse()?;
    let livereload_addr: SocketAddr = server_config
        .address_string(server_config.livereload_port)
        .parse()?;

    let site = axum_server::bind(site_addr).serve(create_app(&destination).into_make_service());
    let ui = axum_server::bind(ui_addr)
        .serve(create_status_app(status, server_config.url()).into_make_service());
    let reload = async move {
        if livereload_enabled {
            axum_server::bind(livereload_addr)
                .serve(create_livereload_app(livereload).into_make_service())
                .await
        } else {
            std::future::pending::<std::io::Result<()>>().await
        }
    };

    print_server_banner(server_config, livereload_enabled);

    tokio::select! {
        result = site => {
            if let Err(e) = result {
                error!("Server error: {}", e);
                return Err(e.into());
            }
            info!("Server stopped");
        },
        result = ui => {
            if let Err(e) = result {
                error!("Status server error: {}", e);
                return Err(e.into());
            }
        },
        result = reload => {
            if let Err(e) = result {
                error!("Live reload server error: {}", e);
                return Err(e.into());
            }
        },
        _ = signal::ctrl_c() => {
            info!("Shutting down server (received Ctrl+C)...");
        },
    }

    Ok(())
}

/// Print a banner with server information
fn print_server_banner(server_config: &ServerConfig, livereload: bool) {
    println!("\n{}", "-".repeat(60));
    println!(" Sitepress Server");
    println!(" - URL: {}", server_config.url());
    println!(" - Status: {}", server_config.ui_url());
    println!(" - Livereload: {}", if livereload { "Enabled" } else { "Disabled" });
    if livereload {
        println!(" - Livereload URL: {}", server_config.livereload_url());
    }
    println!(" - Press Ctrl+C to stop");
    println!("{}\n", "-".repeat(60));
}
