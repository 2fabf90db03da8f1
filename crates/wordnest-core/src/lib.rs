pub mod audio;
pub mod dictionary;
pub mod generation;
pub mod loader;
pub mod lookup;
pub mod preprocess;

pub use wordnest_types::LookupResult;

#[cfg(test)]
mod test_support;
