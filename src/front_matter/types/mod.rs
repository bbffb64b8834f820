pub mod front_matter;
mod deserializers;

pub use front_matter::FrontMatter;
