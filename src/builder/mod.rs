pub mod page;
pub mod site;
pub mod watcher;

pub use site::{build_pages, build_site, BuildOptions, BuildReport};
pub use watcher::{handle_changes, watch_site};
