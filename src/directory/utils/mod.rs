mod file_operations;
mod cleaning;

pub use cleaning::clean_destination;
pub use file_operations::copy_static_files;
