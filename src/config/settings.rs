use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use toml_edit::{DocumentMut, Item, Table};

use crate::session::RunnerSettings;
use crate::util::paths::{config_path, sounds_dir};

/// Example configuration file contents (bundled with the binary)
pub const EXAMPLE_CONFIG: &str = include_str!("config.toml.example");

/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "FITRUN_API_URL";
/// Environment variable overriding the API token
pub const API_TOKEN_ENV: &str = "FITRUN_API_TOKEN";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Remote API settings
    pub api: ApiConfig,
    /// Session runner tunables
    pub session: SessionConfig,
    /// Audio cue settings
    pub audio: AudioConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Server root, without the `/api/v1` suffix
    pub url: String,
    /// Token sent as `Authorization: Token <key>`
    pub token: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub countdown_secs: u32,
    pub default_rest_secs: u64,
    pub extend_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioConfig {
    pub enabled: bool,
    /// Player program name or path (None = autodetect)
    pub player: Option<String>,
    /// Directory holding beep/success/finish sound files
    pub sounds_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            session: SessionConfig::default(),
            audio: AudioConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8000".to_string(),
            token: None,
            timeout_secs: 30,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            countdown_secs: 3,
            default_rest_secs: 60,
            extend_secs: 15,
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            player: None,
            sounds_dir: sounds_dir(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlApiConfig {
    pub url: Option<String>,
    pub token: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlSessionConfig {
    pub countdown_secs: Option<u32>,
    pub default_rest_secs: Option<u64>,
    pub extend_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlAudioConfig {
    pub enabled: Option<bool>,
    pub player: Option<String>,
    pub sounds_dir: Option<PathBuf>,
}

/// TOML representation of the config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub api: Option<TomlApiConfig>,
    pub session: Option<TomlSessionConfig>,
    pub audio: Option<TomlAudioConfig>,
}

impl Config {
    /// Load configuration from the default config file, merging with defaults.
    ///
    /// Creates the file from the bundled example on first run.
    pub fn load() -> Self {
        let config_file = config_path();

        if !config_file.exists() {
            Self::create_default_config(&config_file);
        }

        let mut config = Self::load_from(&config_file);
        config.apply_env();
        config
    }

    /// Load configuration from a specific file. A missing or malformed file
    /// yields the defaults.
    pub fn load_from(path: &Path) -> Self {
        let mut config = Config::default();

        let Ok(contents) = fs::read_to_string(path) else {
            return config;
        };

        match toml::from_str::<TomlConfig>(&contents) {
            Ok(toml_config) => config.merge(toml_config),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring malformed config file");
            }
        }

        config
    }

    fn merge(&mut self, toml_config: TomlConfig) {
        if let Some(api) = toml_config.api {
            if let Some(url) = api.url {
                self.api.url = url;
            }
            if let Some(token) = api.token {
                self.api.token = Some(token).filter(|t| !t.is_empty());
            }
            if let Some(timeout) = api.timeout_secs {
                self.api.timeout_secs = timeout;
            }
        }

        if let Some(session) = toml_config.session {
            if let Some(countdown) = session.countdown_secs {
                self.session.countdown_secs = countdown;
            }
            if let Some(rest) = session.default_rest_secs {
                self.session.default_rest_secs = rest;
            }
            if let Some(extend) = session.extend_secs {
                self.session.extend_secs = extend;
            }
        }

        if let Some(audio) = toml_config.audio {
            if let Some(enabled) = audio.enabled {
                self.audio.enabled = enabled;
            }
            if audio.player.is_some() {
                self.audio.player = audio.player;
            }
            if let Some(dir) = audio.sounds_dir {
                self.audio.sounds_dir = dir;
            }
        }
    }

    /// Apply FITRUN_API_URL / FITRUN_API_TOKEN overrides
    pub fn apply_env(&mut self) {
        if let Ok(url) = env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api.url = url;
            }
        }
        if let Ok(token) = env::var(API_TOKEN_ENV) {
            if !token.trim().is_empty() {
                self.api.token = Some(token);
            }
        }
    }

    /// Create the default config file from the bundled example
    fn create_default_config(path: &Path) {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                if let Err(e) = fs::create_dir_all(parent) {
                    tracing::warn!(error = %e, "Failed to create config directory");
                    return;
                }
            }
        }

        if let Err(e) = fs::write(path, EXAMPLE_CONFIG) {
            tracing::warn!(error = %e, "Failed to write default config");
        }
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api.url = url.into();
        self
    }

    pub fn with_audio_enabled(mut self, enabled: bool) -> Self {
        self.audio.enabled = enabled;
        self
    }

    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    /// Runner tunables derived from the `[session]` section
    pub fn runner_settings(&self) -> RunnerSettings {
        RunnerSettings {
            countdown_from: self.session.countdown_secs,
            default_rest: Duration::from_secs(self.session.default_rest_secs),
            break_extension: Duration::from_secs(self.session.extend_secs),
            ..RunnerSettings::default()
        }
    }
}

/// Save the API token to the config file
///
/// Reads the existing config.toml, sets `token` in the [api] section and
/// writes it back while preserving all other content.
pub fn save_api_token(token: &str) -> std::io::Result<()> {
    save_api_token_to(&config_path(), token)
}

pub fn save_api_token_to(config_file: &Path, token: &str) -> std::io::Result<()> {
    let contents = if config_file.exists() {
        fs::read_to_string(config_file)?
    } else {
        String::new()
    };

    let mut doc: DocumentMut = contents
        .parse()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

    if !doc.contains_key("api") {
        doc["api"] = Item::Table(Table::new());
    }
    doc["api"]["token"] = toml_edit::value(token);

    if let Some(parent) = config_file.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(config_file, doc.to_string())?;

    Ok(())
}
