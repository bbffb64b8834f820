pub mod renderer;
pub mod engine;

pub use renderer::{MarkdownRenderer, markdownify};
