use std::path::{Path, PathBuf};
use std::sync::Arc;

use wordnest_types::LookupResult;

use crate::dictionary::{DictionaryHandle, DictionaryMetadata, DictionaryParser, LoadError};
use crate::generation::{Generation, Ticket};
use crate::lookup;

/// What happened to a finished load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The new dictionary is now active
    Installed(DictionaryMetadata),
    /// A newer load was started meanwhile; this result was dropped
    Superseded,
}

/// Owns the session's active dictionary
pub struct DictionaryLoader {
    parser: Arc<dyn DictionaryParser>,
    active: Option<Box<dyn DictionaryHandle>>,
    generation: Generation,
}

impl DictionaryLoader {
    pub fn new(parser: Arc<dyn DictionaryParser>) -> Self {
        Self {
            parser,
            active: None,
            generation: Generation::new(),
        }
    }

    pub fn parser(&self) -> Arc<dyn DictionaryParser> {
        Arc::clone(&self.parser)
    }

    pub fn handle(&self) -> Option<&dyn DictionaryHandle> {
        self.active.as_deref()
    }

    pub fn metadata(&self) -> Option<DictionaryMetadata> {
        self.active.as_ref().map(|h| h.metadata())
    }

    /// Parse `bytes` and make the result the active dictionary.
    /// On failure the previously active dictionary stays in place.
    pub fn load_dictionary(&mut self, bytes: &[u8]) -> Result<DictionaryMetadata, LoadError> {
        // Anything still in flight is stale from here on
        self.generation.next();

        let handle = self.parser.open(bytes).inspect_err(|e| {
            tracing::warn!("Dictionary load failed, keeping previous dictionary: {}", e);
        })?;

        Ok(self.activate(handle))
    }

    /// Start an asynchronous load; any load started earlier becomes stale
    pub fn begin(&self) -> Ticket {
        self.generation.next()
    }

    /// Apply the result of a load started with `ticket`
    pub fn install(
        &mut self,
        ticket: Ticket,
        parsed: Result<Box<dyn DictionaryHandle>, LoadError>,
    ) -> Result<LoadOutcome, LoadError> {
        if !self.generation.is_current(ticket) {
            match parsed {
                Ok(stale) => {
                    tracing::debug!("Discarding superseded dictionary '{}'", stale.metadata().name);
                    stale.close();
                }
                Err(e) => tracing::debug!("Ignoring failure of superseded load: {}", e),
            }
            return Ok(LoadOutcome::Superseded);
        }

        let handle = parsed.inspect_err(|e| {
            tracing::warn!("Dictionary load failed, keeping previous dictionary: {}", e);
        })?;

        Ok(LoadOutcome::Installed(self.activate(handle)))
    }

    fn activate(&mut self, handle: Box<dyn DictionaryHandle>) -> DictionaryMetadata {
        let metadata = handle.metadata();
        if let Some(previous) = self.active.replace(handle) {
            tracing::info!("Releasing dictionary '{}'", previous.metadata().name);
            previous.close();
        }
        tracing::info!(
            "Loaded dictionary '{}' with {} entries",
            metadata.name,
            metadata.entry_count
        );
        metadata
    }

    pub fn lookup(&self, term: &str) -> LookupResult {
        lookup::lookup(self.handle(), term)
    }
}

impl Drop for DictionaryLoader {
    fn drop(&mut self) {
        if let Some(handle) = self.active.take() {
            handle.close();
        }
    }
}

/// Read a package from disk and parse it off the async executor
pub async fn read_and_parse(
    parser: Arc<dyn DictionaryParser>,
    path: &Path,
) -> Result<Box<dyn DictionaryHandle>, LoadError> {
    tracing::info!("Loading dictionary from file: {}", path.display());
    let bytes = tokio::fs::read(path).await?;

    let path: PathBuf = path.to_path_buf();
    tokio::task::spawn_blocking(move || {
        tracing::debug!("Parsing {} bytes from {}", bytes.len(), path.display());
        parser.open(&bytes)
    })
    .await
    .map_err(|e| LoadError::ParseError(format!("parser task failed: {e}")))?
}
