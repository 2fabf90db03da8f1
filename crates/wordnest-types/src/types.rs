use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub enum AppEvent {
    UiEvent(UiEvent),
    LoadDictionary(PathBuf),
    Lookup(String),
    PlayPronunciation(String),
    Translate {
        text: String,
        provider: Provider,
    },
    AddWord(String),
    ShowWordbook,
    BackendReady,
    DictionaryLoaded {
        name: String,
        entry_count: usize,
    },
    ShowEntry {
        term: String,
        result: LookupResult,
    },
    ShowTranslation {
        source: String,
        text: String,
        provider: Provider,
    },
    TranslationFailed(String),
    TranslationBusy(bool),
    WordbookUpdated(Vec<String>),
    Status(String),
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    Close,
}

/// Outcome of querying the active dictionary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupResult {
    /// Rendered entry markup for the first match
    Found(String),
    /// A dictionary is loaded but has no entry for the term
    NotFound,
    /// No dictionary has been loaded yet
    NoDictionary,
}

impl LookupResult {
    pub fn is_found(&self) -> bool {
        matches!(self, LookupResult::Found(_))
    }

    pub fn markup(&self) -> Option<&str> {
        match self {
            LookupResult::Found(markup) => Some(markup),
            _ => None,
        }
    }
}

/// Remote translation providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    DeepL,
    Gemini,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::DeepL => "deepl",
            Provider::Gemini => "gemini",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deepl" => Ok(Provider::DeepL),
            "gemini" => Ok(Provider::Gemini),
            other => Err(format!("unknown provider: {other}")),
        }
    }
}
