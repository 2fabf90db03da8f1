pub mod dictionary;
pub mod parser;

pub use dictionary::{JsonDictionary, JsonEntry};
pub use parser::JsonPackageParser;
