use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;

use super::{Cue, CuePlayer};

/// Known players, in order of preference, with the arguments placed before the file
const KNOWN_PLAYERS: &[(&str, &[&str])] = &[
    ("afplay", &[]),
    ("paplay", &[]),
    ("mpg123", &["-q"]),
    ("ffplay", &["-nodisp", "-autoexit", "-loglevel", "quiet"]),
    ("aplay", &["-q"]),
];

const SOUND_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg"];

/// Plays cue files by spawning an external audio program
#[derive(Debug, Clone)]
pub struct CommandPlayer {
    program: PathBuf,
    args: Vec<String>,
    sounds_dir: PathBuf,
}

impl CommandPlayer {
    pub fn new(program: PathBuf, args: Vec<String>, sounds_dir: PathBuf) -> Self {
        Self {
            program,
            args,
            sounds_dir,
        }
    }

    /// Locate a player.
    ///
    /// A configured program name or path wins; otherwise the first known
    /// player found in PATH is used.
    pub fn detect(configured: Option<&str>, sounds_dir: PathBuf) -> Option<Self> {
        if let Some(name) = configured {
            let program = which::which(name).ok()?;
            let args = KNOWN_PLAYERS
                .iter()
                .find(|(known, _)| {
                    Path::new(name).file_name().and_then(|f| f.to_str()) == Some(*known)
                })
                .map(|(_, args)| args.iter().map(|a| a.to_string()).collect())
                .unwrap_or_default();
            return Some(Self::new(program, args, sounds_dir));
        }

        KNOWN_PLAYERS.iter().find_map(|(name, args)| {
            which::which(name).ok().map(|program| {
                Self::new(
                    program,
                    args.iter().map(|a| a.to_string()).collect(),
                    sounds_dir.clone(),
                )
            })
        })
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Resolve the sound file for a cue, if one exists
    pub fn sound_file(&self, cue: Cue) -> Option<PathBuf> {
        SOUND_EXTENSIONS
            .iter()
            .map(|ext| self.sounds_dir.join(format!("{}.{}", cue.name(), ext)))
            .find(|path| path.is_file())
    }
}

impl CuePlayer for CommandPlayer {
    fn play(&self, cue: Cue) {
        let Some(file) = self.sound_file(cue) else {
            tracing::debug!(cue = %cue, dir = %self.sounds_dir.display(), "No sound file for cue");
            return;
        };
        // Reaping the child needs a runtime; without one the cue is dropped.
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::debug!(cue = %cue, "No async runtime, skipping cue");
            return;
        };

        let spawned = Command::new(&self.program)
            .args(&self.args)
            .arg(&file)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(false)
            .spawn();

        match spawned {
            Ok(mut child) => {
                handle.spawn(async move {
                    if let Err(e) = child.wait().await {
                        tracing::debug!(error = %e, "Cue player exited abnormally");
                    }
                });
            }
            Err(e) => {
                tracing::debug!(
                    cue = %cue,
                    program = %self.program.display(),
                    error = %e,
                    "Failed to spawn cue player"
                );
            }
        }
    }
}
