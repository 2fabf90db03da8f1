use serde::{Deserialize, Serialize};

fn default_not_found_message() -> String {
    "Not found".to_string()
}

fn default_prompt() -> String {
    "wordnest> ".to_string()
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    /// Shown in place of an entry when the term has no match
    #[serde(default = "default_not_found_message")]
    pub not_found_message: String,
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// Command that plays audio piped to its stdin, e.g. `ffplay -nodisp -autoexit -`
    #[serde(default)]
    pub audio_player: Option<String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            not_found_message: default_not_found_message(),
            prompt: default_prompt(),
            audio_player: None,
        }
    }
}
