/// Opened dictionary package.
///
/// Matching rules (case folding, normalization, redirects) belong to the
/// implementation; callers only see the first match.
pub trait DictionaryHandle: Send + Sync {
    /// Rendered entry markup for the best match, `None` when the term is absent
    fn lookup(&self, term: &str) -> Option<String>;

    /// Raw audio bytes for the term, if the package carries any
    fn pronunciation(&self, term: &str) -> Option<Vec<u8>>;

    /// Get dictionary metadata
    fn metadata(&self) -> DictionaryMetadata;

    /// Release resources held by the package. Called once when the handle is replaced.
    fn close(&self) {}
}

/// Turns raw package bytes into a queryable handle
pub trait DictionaryParser: Send + Sync {
    fn open(&self, bytes: &[u8]) -> Result<Box<dyn DictionaryHandle>, LoadError>;

    /// Supported file extensions
    fn supported_formats(&self) -> Vec<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryMetadata {
    pub name: String,
    pub version: String,
    pub entry_count: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
