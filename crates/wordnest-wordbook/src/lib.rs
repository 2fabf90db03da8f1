pub mod store;

use std::io;

pub use store::{FileStore, KeyValueStore, MemoryStore};

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Stored wordbook is corrupt: {0}")]
    Corrupt(serde_json::Error),

    #[error("Failed to serialize wordbook: {0}")]
    Serialize(serde_json::Error),
}

/// Saved terms, newest first, without duplicates.
///
/// Every successful `add` is written through to the store before the
/// in-memory list changes, so the two copies never diverge.
pub struct Wordbook {
    store: Box<dyn KeyValueStore>,
    key: String,
    terms: Vec<String>,
    loaded: bool,
}

impl Wordbook {
    pub fn new(store: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            terms: Vec::new(),
            loaded: false,
        }
    }

    /// Read the persisted list. A missing key yields an empty wordbook.
    ///
    /// A corrupt value leaves the wordbook empty but usable; the next `add`
    /// replaces it. A read failure leaves it unloaded.
    pub fn load_all(&mut self) -> Result<&[String], PersistenceError> {
        let stored = self.store.get(&self.key)?;
        let parsed = match stored {
            Some(data) => serde_json::from_str::<Vec<String>>(&data),
            None => Ok(Vec::new()),
        };

        self.loaded = true;
        match parsed {
            Ok(terms) => {
                self.terms = terms;
                tracing::info!("Loaded {} wordbook entries", self.terms.len());
                Ok(&self.terms)
            }
            Err(e) => {
                self.terms.clear();
                Err(PersistenceError::Corrupt(e))
            }
        }
    }

    /// Save `term` at the front. Already-present terms are left where they are.
    ///
    /// If the list was never read successfully the read is retried first, and
    /// its error returned when it fails again.
    pub fn add(&mut self, term: &str) -> Result<&[String], PersistenceError> {
        if !self.loaded {
            tracing::info!("Wordbook not loaded yet, reading it before adding '{}'", term);
            match self.load_all() {
                Ok(_) => {}
                Err(PersistenceError::Corrupt(e)) => {
                    tracing::warn!("Replacing corrupt wordbook: {}", e);
                }
                Err(e) => return Err(e),
            }
        }

        if self.contains(term) {
            tracing::debug!("'{}' already in wordbook", term);
            return Ok(&self.terms);
        }

        let mut updated = Vec::with_capacity(self.terms.len() + 1);
        updated.push(term.to_string());
        updated.extend(self.terms.iter().cloned());

        let data = serde_json::to_string(&updated).map_err(PersistenceError::Serialize)?;
        self.store.set(&self.key, &data).inspect_err(|e| {
            tracing::error!("Failed to persist wordbook, '{}' not added: {}", term, e);
        })?;

        self.terms = updated;
        tracing::info!("Added '{}' to wordbook ({} entries)", term, self.terms.len());
        Ok(&self.terms)
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.iter().any(|t| t == term)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
