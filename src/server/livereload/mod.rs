mod handler;

pub use handler::{create_livereload_handler, LiveReload, LIVERELOAD_PATH};
