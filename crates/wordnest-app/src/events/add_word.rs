use std::sync::Arc;

use kanal::AsyncSender;
use wordnest_core::preprocess::{DefaultPreprocessor, Preprocessor};
use wordnest_types::AppEvent;

use crate::state::AppState;

pub async fn handle_add_word(
    state: Arc<AppState>,
    term: String,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let term = DefaultPreprocessor.process(&term);
    if term.is_empty() {
        app_to_ui_tx
            .send(AppEvent::Status("Nothing to save".to_string()))
            .await?;
        return Ok(());
    }

    // The store does blocking file I/O
    let wordbook = Arc::clone(&state.wordbook);
    let event = tokio::task::spawn_blocking(move || {
        let mut wordbook = wordbook.blocking_lock();
        let already_saved = wordbook.contains(&term);

        match wordbook.add(&term) {
            Ok(_) if already_saved => AppEvent::Status(format!("'{}' is already saved", term)),
            Ok(terms) => AppEvent::WordbookUpdated(terms.to_vec()),
            Err(e) => AppEvent::Status(format!("Could not save '{}': {}", term, e)),
        }
    })
    .await?;

    app_to_ui_tx.send(event).await?;
    Ok(())
}

pub async fn handle_show_wordbook(
    state: Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let terms = state.wordbook.lock().await.terms().to_vec();
    app_to_ui_tx.send(AppEvent::WordbookUpdated(terms)).await?;
    Ok(())
}
