use std::sync::Arc;

use kanal::AsyncSender;
use wordnest_core::lookup::play_pronunciation;
use wordnest_core::preprocess::{DefaultPreprocessor, Preprocessor};
use wordnest_types::AppEvent;

use crate::state::AppState;

pub async fn handle_lookup(
    state: Arc<AppState>,
    term: String,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let term = DefaultPreprocessor.process(&term);
    if term.is_empty() {
        return Ok(());
    }

    let result = state.loader.lock().await.lookup(&term);
    tracing::debug!("Lookup '{}': found={}", term, result.is_found());

    app_to_ui_tx.send(AppEvent::ShowEntry { term, result }).await?;
    Ok(())
}

pub async fn handle_pronunciation(state: Arc<AppState>, term: String) {
    let term = DefaultPreprocessor.process(&term);
    let loader = state.loader.lock().await;
    play_pronunciation(loader.handle(), &term, state.audio.as_ref());
}
