use std::sync::Arc;

use parking_lot::Mutex;

use super::{Cue, CuePlayer};

/// Player that records cues instead of playing them. Used by tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingPlayer {
    played: Arc<Mutex<Vec<Cue>>>,
}

impl RecordingPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cues played so far, in order
    pub fn played(&self) -> Vec<Cue> {
        self.played.lock().clone()
    }

    pub fn count(&self, cue: Cue) -> usize {
        self.played.lock().iter().filter(|c| **c == cue).count()
    }
}

impl CuePlayer for RecordingPlayer {
    fn play(&self, cue: Cue) {
        self.played.lock().push(cue);
    }
}
