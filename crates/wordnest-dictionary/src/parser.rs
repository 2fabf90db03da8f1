use wordnest_core::dictionary::{DictionaryHandle, DictionaryParser, LoadError};

use crate::dictionary::JsonDictionary;

pub struct JsonPackageParser;

impl DictionaryParser for JsonPackageParser {
    fn open(&self, bytes: &[u8]) -> Result<Box<dyn DictionaryHandle>, LoadError> {
        tracing::info!("Opening dictionary package ({} bytes)", bytes.len());
        let dict = JsonDictionary::from_slice(bytes)?;
        tracing::info!("Loaded {} dictionary entries", dict.entry_count());
        Ok(Box::new(dict))
    }

    fn supported_formats(&self) -> Vec<String> {
        vec!["json".to_string(), "wndict".to_string()]
    }
}
