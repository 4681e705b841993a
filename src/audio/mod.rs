//! Audible cues played while a session runs.
//!
//! Playback is fire-and-forget: a player never blocks the caller and never
//! reports failure upward.

mod command;
mod recording;

use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

pub use command::CommandPlayer;
pub use recording::RecordingPlayer;

use crate::config::AudioConfig;

/// Named sound cue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Countdown tick and automatic break end
    Beep,
    /// An exercise other than the last was finished
    Success,
    /// The last exercise was finished
    Finish,
}

impl Cue {
    /// File stem of the cue's sound file
    pub fn name(&self) -> &'static str {
        match self {
            Cue::Beep => "beep",
            Cue::Success => "success",
            Cue::Finish => "finish",
        }
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Something that can play cues
pub trait CuePlayer: Send + Sync {
    fn play(&self, cue: Cue);
}

/// Player that does nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentPlayer;

impl CuePlayer for SilentPlayer {
    fn play(&self, _cue: Cue) {}
}

/// Player that rings the terminal bell for every cue
#[derive(Debug, Default, Clone, Copy)]
pub struct BellPlayer;

impl CuePlayer for BellPlayer {
    fn play(&self, cue: Cue) {
        let mut stdout = io::stdout();
        if let Err(e) = stdout.write_all(b"\x07").and_then(|_| stdout.flush()) {
            tracing::debug!(cue = %cue, error = %e, "Failed to ring terminal bell");
        }
    }
}

/// Build the cue player described by the audio configuration.
///
/// Falls back to the terminal bell when no external player is available.
pub fn player_from_config(config: &AudioConfig) -> Arc<dyn CuePlayer> {
    if !config.enabled {
        return Arc::new(SilentPlayer);
    }
    match CommandPlayer::detect(config.player.as_deref(), config.sounds_dir.clone()) {
        Some(player) => {
            tracing::info!(program = %player.program().display(), "Using external cue player");
            Arc::new(player)
        }
        None => {
            tracing::info!("No external audio player found, using terminal bell");
            Arc::new(BellPlayer)
        }
    }
}
