pub mod app;
pub mod config;
pub mod core;
pub mod handlers;
pub mod livereload;

pub use self::config::ServerConfig;
pub use self::core::serve;
