use std::collections::HashMap;

use serde::Deserialize;
use unicode_normalization::UnicodeNormalization;
use wordnest_core::dictionary::{DictionaryHandle, DictionaryMetadata, LoadError};

/// Entries whose definition starts with this redirect to another headword
const LINK_PREFIX: &str = "@@@LINK=";
const SOUND_SCHEME: &str = "sound://";
const MAX_REDIRECTS: usize = 8;

/// Dictionary entry
#[derive(Debug, Clone, Deserialize)]
pub struct JsonEntry {
    pub headword: String,
    /// Rendered markup, or a `@@@LINK=` redirect
    pub definition: String,
    /// Resource name of the pronunciation, `sound://` prefix optional
    #[serde(default)]
    pub sound: Option<String>,
}

impl JsonEntry {
    fn redirect(&self) -> Option<&str> {
        self.definition
            .strip_prefix(LINK_PREFIX)
            .map(str::trim)
            .filter(|target| !target.is_empty())
    }
}

// On-disk package layout
#[derive(Debug, Deserialize)]
struct PackageJson {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    version: Option<String>,
    entries: Vec<JsonEntry>,
    #[serde(default)]
    resources: HashMap<String, Vec<u8>>,
}

/// Dictionary opened from a JSON package
pub struct JsonDictionary {
    name: String,
    version: String,
    entries: Vec<JsonEntry>,
    exact_index: HashMap<String, Vec<usize>>,
    folded_index: HashMap<String, Vec<usize>>,
    resources: HashMap<String, Vec<u8>>,
}

fn normalize(term: &str) -> String {
    term.trim().nfc().collect()
}

fn fold(term: &str) -> String {
    normalize(term).to_lowercase()
}

fn resource_key(name: &str) -> String {
    let name = name.strip_prefix(SOUND_SCHEME).unwrap_or(name);
    name.replace('\\', "/").trim_start_matches('/').to_lowercase()
}

impl JsonDictionary {
    /// Load from package bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self, LoadError> {
        let data: PackageJson =
            serde_json::from_slice(bytes).map_err(|e| LoadError::ParseError(e.to_string()))?;

        if data.entries.is_empty() {
            return Err(LoadError::InvalidFormat("package has no entries".to_string()));
        }

        let mut entries = Vec::with_capacity(data.entries.len());
        let mut exact_index: HashMap<String, Vec<usize>> = HashMap::new();
        let mut folded_index: HashMap<String, Vec<usize>> = HashMap::new();

        for entry in data.entries {
            let key = normalize(&entry.headword);
            if key.is_empty() {
                tracing::warn!("Skipping entry with empty headword");
                continue;
            }

            let idx = entries.len();
            folded_index.entry(key.to_lowercase()).or_default().push(idx);
            exact_index.entry(key).or_default().push(idx);
            entries.push(entry);
        }

        if entries.is_empty() {
            return Err(LoadError::InvalidFormat("package has no usable entries".to_string()));
        }

        let resources = data
            .resources
            .into_iter()
            .map(|(name, bytes)| (resource_key(&name), bytes))
            .collect();

        Ok(Self {
            name: data.name.unwrap_or_else(|| "Untitled".to_string()),
            version: data.version.unwrap_or_default(),
            entries,
            exact_index,
            folded_index,
            resources,
        })
    }

    /// Get the number of entries in the dictionary
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// First entry for the term: exact match, then case-insensitive
    fn find(&self, term: &str) -> Option<&JsonEntry> {
        self.exact_index
            .get(&normalize(term))
            .or_else(|| self.folded_index.get(&fold(term)))
            .and_then(|indices| indices.first())
            .and_then(|&idx| self.entries.get(idx))
    }

    /// Find the entry, following redirects
    fn resolve(&self, term: &str) -> Option<&JsonEntry> {
        let mut entry = self.find(term)?;

        for _ in 0..MAX_REDIRECTS {
            match entry.redirect() {
                Some(target) => entry = self.find(target)?,
                None => return Some(entry),
            }
        }

        tracing::warn!("Redirect chain for '{}' too long, giving up", term);
        None
    }
}

impl DictionaryHandle for JsonDictionary {
    fn lookup(&self, term: &str) -> Option<String> {
        self.resolve(term).map(|entry| entry.definition.clone())
    }

    fn pronunciation(&self, term: &str) -> Option<Vec<u8>> {
        let sound = self.resolve(term)?.sound.as_deref()?;
        self.resources.get(&resource_key(sound)).cloned()
    }

    fn metadata(&self) -> DictionaryMetadata {
        DictionaryMetadata {
            name: self.name.clone(),
            version: self.version.clone(),
            entry_count: self.entries.len(),
        }
    }

    fn close(&self) {
        tracing::debug!("Closing dictionary '{}'", self.name);
    }
}
