pub mod types;
pub mod parser;

// Re-export the most common items for convenience
pub use types::FrontMatter;
pub use parser::split;
