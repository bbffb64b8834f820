mod builder;
mod context;
mod converter;
mod loader;
mod output;
mod processor;

pub use builder::{build_pages, build_site, BuildOptions, BuildReport};
