mod fs_watcher;

pub use fs_watcher::{handle_changes, watch_site};
