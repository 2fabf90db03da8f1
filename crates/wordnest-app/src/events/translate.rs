use std::sync::Arc;

use kanal::AsyncSender;
use wordnest_types::{AppEvent, Provider};

use crate::state::AppState;

pub async fn handle_translate(
    state: Arc<AppState>,
    text: String,
    provider: Provider,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let pending = state.translator.begin(text, provider);
    tracing::info!(
        "Translation #{} via {} ({} chars)",
        pending.ticket.id(),
        provider,
        pending.text.len()
    );
    app_to_ui_tx.send(AppEvent::TranslationBusy(true)).await?;

    let tx = app_to_ui_tx.clone();
    tokio::spawn(async move {
        let result = pending.send().await;

        let event = match state.translator.finish(pending.ticket, result) {
            Some(Ok(translation)) => Some(AppEvent::ShowTranslation {
                source: pending.text,
                text: translation.text,
                provider: translation.provider,
            }),
            Some(Err(e)) => {
                tracing::warn!("Translation via {} failed: {}", provider, e);
                Some(AppEvent::TranslationFailed(e.to_string()))
            }
            None => None,
        };

        if let Some(event) = event {
            report(&tx, event).await;
        }
        report(&tx, AppEvent::TranslationBusy(state.translator.is_busy())).await;
    });

    Ok(())
}

/// Deliver an update to the UI. A closed channel is logged, not fatal.
async fn report(tx: &AsyncSender<AppEvent>, event: AppEvent) -> bool {
    match tx.send(event).await {
        Ok(()) => true,
        Err(e) => {
            tracing::error!("Failed to report translation update: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn report_survives_closed_ui_channel() {
        let (tx, rx) = kanal::unbounded_async();
        assert!(report(&tx, AppEvent::TranslationBusy(true)).await);
        assert!(matches!(rx.recv().await, Ok(AppEvent::TranslationBusy(true))));

        drop(rx);
        assert!(!report(&tx, AppEvent::TranslationBusy(false)).await);
    }
}
