use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use wordnest_types::{AppEvent, UiEvent};

use crate::state::AppState;

pub mod add_word;
pub mod load_dictionary;
pub mod lookup;
pub mod translate;

use add_word::{handle_add_word, handle_show_wordbook};
use load_dictionary::handle_dictionary_load;
use lookup::{handle_lookup, handle_pronunciation};
use translate::handle_translate;

/// App's main loop
pub async fn event_loop(
    state: Arc<AppState>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    app_to_ui_tx.send(AppEvent::BackendReady).await?;

    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        let event = ui_to_app_rx.recv().await?;

        tracing::debug!(
            "[EVENT_LOOP] EVENT RECEIVED: {:?}",
            std::mem::discriminant(&event)
        );
        if let AppEvent::UiEvent(UiEvent::Close) = event {
            tracing::info!("[EVENT_LOOP] Close requested");
            return Ok(());
        }

        handle_events(state.clone(), &app_to_ui_tx, event).await?;
    }
}

async fn handle_events(
    state: Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    event: AppEvent,
) -> anyhow::Result<()> {
    match event {
        AppEvent::LoadDictionary(path) => {
            handle_dictionary_load(state, path, app_to_ui_tx).await?;
        }
        AppEvent::Lookup(term) => {
            handle_lookup(state, term, app_to_ui_tx).await?;
        }
        AppEvent::PlayPronunciation(term) => {
            handle_pronunciation(state, term).await;
        }
        AppEvent::Translate { text, provider } => {
            handle_translate(state, text, provider, app_to_ui_tx).await?;
        }
        AppEvent::AddWord(term) => {
            handle_add_word(state, term, app_to_ui_tx).await?;
        }
        AppEvent::ShowWordbook => {
            handle_show_wordbook(state, app_to_ui_tx).await?;
        }
        AppEvent::UiEvent(_) => {}
        AppEvent::BackendReady
        | AppEvent::DictionaryLoaded { .. }
        | AppEvent::ShowEntry { .. }
        | AppEvent::ShowTranslation { .. }
        | AppEvent::TranslationFailed(_)
        | AppEvent::TranslationBusy(_)
        | AppEvent::WordbookUpdated(_)
        | AppEvent::Status(_) => {
            // UI-only events, ignore in backend
        }
    }

    Ok(())
}
