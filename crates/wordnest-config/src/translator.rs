use serde::{Deserialize, Serialize};
use wordnest_types::Provider;

fn default_target_lang() -> String {
    "EN".to_string()
}

fn default_deepl_url() -> String {
    "https://api.deepl.com/v2/translate".to_string()
}

fn default_gemini_url() -> String {
    "https://api.gemini.example/translate".to_string()
}

#[derive(Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    pub api_url: String,
    /// Secrets normally come from the environment and are never written back to profiles
    #[serde(default, skip_serializing)]
    pub api_key: String,
}

impl ProviderConfig {
    pub fn new(api_url: String) -> Self {
        Self {
            api_url,
            api_key: String::new(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TranslatorConfig {
    pub default_provider: Provider,
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
    /// Request timeout; transport default when unset
    pub timeout_seconds: Option<u64>,
    pub deepl: ProviderConfig,
    pub gemini: ProviderConfig,
}

impl TranslatorConfig {
    pub fn provider(&self, provider: Provider) -> &ProviderConfig {
        match provider {
            Provider::DeepL => &self.deepl,
            Provider::Gemini => &self.gemini,
        }
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            default_provider: Provider::default(),
            target_lang: default_target_lang(),
            timeout_seconds: None,
            deepl: ProviderConfig::new(default_deepl_url()),
            gemini: ProviderConfig::new(default_gemini_url()),
        }
    }
}
