//! On-disk layout
//!
//! fitrun keeps everything under one root, `~/.fitrun` unless `--data-dir`
//! points elsewhere:
//!
//! ```text
//! <root>/config.toml
//! <root>/logs/fitrun.log
//! <root>/sounds/<cue>.wav
//! ```

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

static ROOT: OnceLock<PathBuf> = OnceLock::new();

const CONFIG_FILE: &str = "config.toml";
const LOGS: &str = "logs";
const LOG_FILE: &str = "fitrun.log";
const SOUNDS: &str = "sounds";

/// Pin the data root. Only the first call has any effect, and only if it
/// happens before the first lookup; with `None` the home default is used.
pub fn init_data_dir(custom: Option<PathBuf>) {
    let Some(custom) = custom else {
        return;
    };
    if let Err(rejected) = ROOT.set(custom) {
        tracing::debug!(
            rejected = %rejected.display(),
            root = %root().display(),
            "Data directory already fixed"
        );
    }
}

fn root() -> &'static Path {
    ROOT.get_or_init(|| {
        dirs::home_dir()
            .unwrap_or_default()
            .join(".fitrun")
    })
}

fn under(root: &Path, parts: &[&str]) -> PathBuf {
    parts.iter().fold(root.to_path_buf(), |path, part| path.join(part))
}

pub fn data_dir() -> PathBuf {
    root().to_path_buf()
}

pub fn config_path() -> PathBuf {
    under(root(), &[CONFIG_FILE])
}

pub fn logs_dir() -> PathBuf {
    under(root(), &[LOGS])
}

pub fn log_file_path() -> PathBuf {
    under(root(), &[LOGS, LOG_FILE])
}

/// Default lookup directory for `<cue>.wav` files
pub fn sounds_dir() -> PathBuf {
    under(root(), &[SOUNDS])
}
