use wordnest_types::LookupResult;

use crate::audio::AudioOutput;
use crate::dictionary::DictionaryHandle;

/// Query the active dictionary. Without a dictionary this is a no-op.
pub fn lookup(handle: Option<&dyn DictionaryHandle>, term: &str) -> LookupResult {
    let Some(handle) = handle else {
        tracing::debug!("Lookup for '{}' ignored, no dictionary loaded", term);
        return LookupResult::NoDictionary;
    };

    match handle.lookup(term) {
        Some(markup) => LookupResult::Found(markup),
        None => {
            tracing::debug!("'{}' not found in {}", term, handle.metadata().name);
            LookupResult::NotFound
        }
    }
}

/// Fire-and-forget pronunciation playback. Failures stay at this layer.
pub fn play_pronunciation(
    handle: Option<&dyn DictionaryHandle>,
    term: &str,
    output: &dyn AudioOutput,
) {
    let Some(handle) = handle else {
        return;
    };

    let Some(audio) = handle.pronunciation(term) else {
        tracing::debug!("No pronunciation for '{}'", term);
        return;
    };

    if let Err(e) = output.play(term, &audio) {
        tracing::warn!("Pronunciation playback for '{}' failed: {}", term, e);
    }
}
