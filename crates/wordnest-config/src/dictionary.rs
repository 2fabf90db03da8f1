use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Package opened at startup, if any
    #[serde(default)]
    pub path: Option<String>,
}
