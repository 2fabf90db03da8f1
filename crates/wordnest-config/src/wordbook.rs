use serde::{Deserialize, Serialize};

fn default_storage_key() -> String {
    "wordbook".to_string()
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct WordbookConfig {
    /// Key the term list is stored under
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Overrides the per-profile storage directory
    #[serde(default)]
    pub storage_dir: Option<String>,
}

impl Default for WordbookConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            storage_dir: None,
        }
    }
}
