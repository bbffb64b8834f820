pub mod yaml_parser;

pub use yaml_parser::split;
