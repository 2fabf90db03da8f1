use std::path::PathBuf;
use std::sync::Arc;

use kanal::AsyncSender;
use wordnest_core::loader::{LoadOutcome, read_and_parse};
use wordnest_types::AppEvent;

use crate::state::AppState;

/// Read and parse in the background; the result is installed only if no newer load started
pub async fn handle_dictionary_load(
    state: Arc<AppState>,
    path: PathBuf,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let (ticket, parser) = {
        let loader = state.loader.lock().await;
        (loader.begin(), loader.parser())
    };

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    if !parser.supported_formats().contains(&extension) {
        tracing::warn!(
            "'{}' does not look like a supported package ({}), trying anyway",
            path.display(),
            parser.supported_formats().join(", ")
        );
    }

    app_to_ui_tx
        .send(AppEvent::Status(format!("Loading {}...", path.display())))
        .await?;

    let tx = app_to_ui_tx.clone();
    tokio::spawn(async move {
        let parsed = read_and_parse(parser, &path).await;
        let outcome = state.loader.lock().await.install(ticket, parsed);

        let event = match outcome {
            Ok(LoadOutcome::Installed(metadata)) => AppEvent::DictionaryLoaded {
                name: metadata.name,
                entry_count: metadata.entry_count,
            },
            Ok(LoadOutcome::Superseded) => return,
            Err(e) => AppEvent::Status(format!(
                "Could not open {}: {}. Pick another file.",
                path.display(),
                e
            )),
        };

        if let Err(e) = tx.send(event).await {
            tracing::error!("Failed to report dictionary load: {}", e);
        }
    });

    Ok(())
}
