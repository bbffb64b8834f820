use std::path::Path;

use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::server::handlers::{create_static_files_handler, create_status_handler, SharedStatus};
use crate::server::livereload::{create_livereload_handler, LiveReload};

/// Router serving the built site
pub fn create_app(destination: &Path) -> Router {
    create_static_files_handler(destination)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

/// Router serving the live-reload event stream
pub fn create_livereload_app(livereload: LiveReload) -> Router {
    create_livereload_handler(livereload).layer(TraceLayer::new_for_http())
}

/// Router serving the build status page
pub fn create_status_app(status: SharedStatus, site_url: String) -> Router {
    create_status_handler(status, site_url).layer(TraceLayer::new_for_http())
}
