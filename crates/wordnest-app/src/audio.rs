use std::io::{self, Write};
use std::process::{Command, Stdio};

use wordnest_core::audio::AudioOutput;

/// Pipes pronunciation audio into an external player
pub struct CommandAudio {
    program: String,
    args: Vec<String>,
}

impl CommandAudio {
    pub fn parse(command: &str) -> Option<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }
}

impl AudioOutput for CommandAudio {
    fn play(&self, term: &str, audio: &[u8]) -> io::Result<()> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| io::Error::other("player stdin unavailable"))?;
        let audio = audio.to_vec();
        let term = term.to_string();

        // Nobody waits on playback
        std::thread::spawn(move || {
            if let Err(e) = stdin.write_all(&audio) {
                tracing::debug!("Audio pipe for '{}' closed early: {}", term, e);
            }
            drop(stdin);
            let _ = child.wait();
        });

        Ok(())
    }
}
