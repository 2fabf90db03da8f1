use std::env;

use serde::{Deserialize, Serialize};

use self::dictionary::DictionaryConfig;
use self::translator::TranslatorConfig;
use self::ui::UiConfig;
use self::wordbook::WordbookConfig;

pub mod dictionary;
pub mod translator;
pub mod ui;
pub mod wordbook;

#[derive(Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub dictionary: DictionaryConfig,
    pub translator: TranslatorConfig,
    pub wordbook: WordbookConfig,
    pub ui: UiConfig,
}

impl Config {
    /// Overlay secrets and endpoints from the environment
    pub fn apply_env(&mut self) {
        self.apply_vars(|key| env::var(key).ok());
    }

    fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        let set = |key: &str| var(key).filter(|v| !v.is_empty());

        if let Some(key) = set("DEEPL_AUTH_KEY") {
            self.translator.deepl.api_key = key;
        }
        if let Some(key) = set("GEMINI_API_KEY") {
            self.translator.gemini.api_key = key;
        }
        if let Some(url) = set("DEEPL_API_URL") {
            self.translator.deepl.api_url = url;
        }
        if let Some(url) = set("GEMINI_API_URL") {
            self.translator.gemini.api_url = url;
        }
        if let Some(lang) = set("TARGET_LANG") {
            self.translator.target_lang = lang;
        }
        if let Some(path) = set("WORDNEST_DICTIONARY") {
            self.dictionary.path = Some(path);
        }
    }
}
