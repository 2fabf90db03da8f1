use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use wordnest_config::Config;
use wordnest_core::audio::{AudioOutput, NullAudio};
use wordnest_core::dictionary::DictionaryParser;
use wordnest_core::loader::DictionaryLoader;
use wordnest_dictionary::JsonPackageParser;
use wordnest_translator::TranslationClient;
use wordnest_wordbook::{KeyValueStore, Wordbook};

use crate::audio::CommandAudio;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub loader: Mutex<DictionaryLoader>,
    pub wordbook: Arc<Mutex<Wordbook>>,
    pub translator: TranslationClient,
    pub audio: Box<dyn AudioOutput>,
}

impl AppState {
    pub fn new(config: Config, store: Box<dyn KeyValueStore>) -> anyhow::Result<Self> {
        let translator = TranslationClient::from_config(&config.translator)?;

        let audio: Box<dyn AudioOutput> = match config.ui.audio_player.as_deref() {
            Some(command) => match CommandAudio::parse(command) {
                Some(player) => Box::new(player),
                None => {
                    tracing::warn!("Ignoring empty audio_player setting");
                    Box::new(NullAudio)
                }
            },
            None => Box::new(NullAudio),
        };

        Ok(Self::with_parts(
            config,
            Arc::new(JsonPackageParser),
            store,
            translator,
            audio,
        ))
    }

    pub fn with_parts(
        config: Config,
        parser: Arc<dyn DictionaryParser>,
        store: Box<dyn KeyValueStore>,
        translator: TranslationClient,
        audio: Box<dyn AudioOutput>,
    ) -> Self {
        let wordbook = Wordbook::new(store, config.wordbook.storage_key.clone());

        Self {
            config: Arc::new(RwLock::new(config)),
            loader: Mutex::new(DictionaryLoader::new(parser)),
            wordbook: Arc::new(Mutex::new(wordbook)),
            translator,
            audio,
        }
    }

    /// Startup read of the wordbook. Failures are logged; the session continues.
    pub async fn load_wordbook(&self) {
        let wordbook = Arc::clone(&self.wordbook);
        let loaded = tokio::task::spawn_blocking(move || {
            wordbook.blocking_lock().load_all().map(|terms| terms.len())
        })
        .await;

        match loaded {
            Ok(Ok(count)) => tracing::debug!("Wordbook ready with {} terms", count),
            Ok(Err(e)) => tracing::error!("Failed to load wordbook: {}", e),
            Err(e) => tracing::error!("Wordbook load task failed: {}", e),
        }
    }
}
