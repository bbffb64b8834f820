pub mod model;
mod collector;
mod date;
mod excerpt;
mod permalink;

pub use model::{ContentItem, Page, PassThrough, SourceFile};
pub use collector::collect_sources;
pub use date::date_from_file_name;
pub use excerpt::{call_to_action, extract_excerpt};
pub use permalink::{destination_for, normalize_permalink, passthrough_destination, permalink_for};
