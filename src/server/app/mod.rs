mod factory;

pub use factory::{create_app, create_livereload_app, create_status_app};
