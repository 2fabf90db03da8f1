use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::dictionary::{DictionaryHandle, DictionaryMetadata, DictionaryParser, LoadError};

pub struct FakeDictionary {
    name: String,
    entries: HashMap<String, String>,
    sounds: HashMap<String, Vec<u8>>,
    pub closed: Arc<AtomicBool>,
}

impl FakeDictionary {
    pub fn new(name: &str, entries: &[(&str, &str)]) -> Self {
        Self {
            name: name.to_string(),
            entries: entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            sounds: HashMap::new(),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_sound(mut self, term: &str, audio: Vec<u8>) -> Self {
        self.sounds.insert(term.to_string(), audio);
        self
    }
}

impl DictionaryHandle for FakeDictionary {
    fn lookup(&self, term: &str) -> Option<String> {
        self.entries.get(term).cloned()
    }

    fn pronunciation(&self, term: &str) -> Option<Vec<u8>> {
        self.sounds.get(term).cloned()
    }

    fn metadata(&self) -> DictionaryMetadata {
        DictionaryMetadata {
            name: self.name.clone(),
            version: "test".to_string(),
            entry_count: self.entries.len(),
        }
    }

    fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

/// Accepts `name:term=markup;term=markup`, rejects anything else
pub struct FakeParser;

impl DictionaryParser for FakeParser {
    fn open(&self, bytes: &[u8]) -> Result<Box<dyn DictionaryHandle>, LoadError> {
        let text = std::str::from_utf8(bytes).map_err(|e| LoadError::ParseError(e.to_string()))?;
        let (name, body) = text
            .split_once(':')
            .ok_or_else(|| LoadError::InvalidFormat("missing name".to_string()))?;

        let pairs: Vec<(&str, &str)> = body
            .split(';')
            .filter_map(|pair| pair.split_once('='))
            .collect();
        if pairs.is_empty() {
            return Err(LoadError::InvalidFormat("no entries".to_string()));
        }

        Ok(Box::new(FakeDictionary::new(name, &pairs)))
    }

    fn supported_formats(&self) -> Vec<String> {
        vec!["fake".to_string()]
    }
}
