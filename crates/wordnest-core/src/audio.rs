use std::io;

/// Sink for pronunciation audio
pub trait AudioOutput: Send + Sync {
    fn play(&self, term: &str, audio: &[u8]) -> io::Result<()>;
}

/// Discards audio; used when no player is configured
pub struct NullAudio;

impl AudioOutput for NullAudio {
    fn play(&self, term: &str, audio: &[u8]) -> io::Result<()> {
        tracing::debug!("No audio output configured, dropping {} bytes for '{}'", audio.len(), term);
        Ok(())
    }
}
