mod static_files;
mod status;

pub use static_files::create_static_files_handler;
pub use status::{create_status_handler, BuildStatus, SharedStatus};
