use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::common::Language;
use crate::error::{AssistantError, Result};
use crate::responder::fixed::{DEFAULT_FIXED_DELAY, DEFAULT_FIXED_REPLY};
use crate::responder::random::{DEFAULT_CANDIDATES, DEFAULT_MAX_DELAY, DEFAULT_MIN_DELAY};
use crate::storage::{read_file, write_file};

pub const DEFAULT_CONFIG_PATH: &str = "config/assistant.json";
pub const DEFAULT_EXPORT_PATH: &str = "campus-chat-history.json";
pub const DEFAULT_TRANSCRIPT_PATH: &str = "campus-chat-transcript.txt";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Switches the greeting to the personal one.
    pub user_name: Option<String>,
    #[serde(deserialize_with = "lenient_language")]
    pub language: Language,
    pub speech_enabled: bool,
    pub reply: ReplyConfig,
    pub speech: SpeechConfig,
    pub export_path: PathBuf,
    pub transcript_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            user_name: None,
            language: Language::default(),
            speech_enabled: true,
            reply: ReplyConfig::default(),
            speech: SpeechConfig::default(),
            export_path: PathBuf::from(DEFAULT_EXPORT_PATH),
            transcript_path: PathBuf::from(DEFAULT_TRANSCRIPT_PATH),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyMode {
    Fixed,
    Random,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplyConfig {
    pub mode: ReplyMode,
    /// Delay for `fixed` mode.
    pub delay_ms: u64,
    pub fixed_reply: String,
    /// Delay window for `random` mode.
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
    pub candidates: Vec<String>,
}

impl Default for ReplyConfig {
    fn default() -> Self {
        Self {
            mode: ReplyMode::Random,
            delay_ms: DEFAULT_FIXED_DELAY.as_millis() as u64,
            fixed_reply: DEFAULT_FIXED_REPLY.to_string(),
            min_delay_ms: DEFAULT_MIN_DELAY.as_millis() as u64,
            max_delay_ms: DEFAULT_MAX_DELAY.as_millis() as u64,
            candidates: DEFAULT_CANDIDATES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// External programs backing the speech capabilities. A missing entry means
/// the capability is absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Prints one transcript on stdout. `{locale}` is substituted.
    pub recognizer_command: Option<String>,
    /// Speaks its input. `{locale}` and `{text}` are substituted.
    pub synthesizer_command: Option<String>,
}

fn lenient_language<'de, D>(deserializer: D) -> std::result::Result<Language, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.parse::<Language>().unwrap_or_else(|err| {
        log::warn!("{err}; falling back to {}", Language::default());
        Language::default()
    }))
}

/// Reads and parses `path`, reporting a missing or malformed file.
pub fn read_config(path: &Path) -> Result<AppConfig> {
    let raw = read_file(path)?;
    serde_json::from_str(&raw).map_err(|source| AssistantError::ConfigFormat {
        path: path.to_path_buf(),
        source,
    })
}

/// Never fails: a missing file means defaults, anything worse is logged and
/// also falls back to defaults.
pub fn load_config(path: impl AsRef<Path>) -> AppConfig {
    let path = path.as_ref();
    match read_config(path) {
        Ok(config) => {
            log::info!("Loaded config from {}", path.display());
            config
        }
        Err(err) if err.is_missing_file() => {
            log::info!("No config at {}; using defaults", path.display());
            AppConfig::default()
        }
        Err(err) => {
            log::warn!("{err}; using defaults");
            AppConfig::default()
        }
    }
}

pub fn save_config(path: impl AsRef<Path>, config: &AppConfig) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    write_file(path.as_ref(), &json)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        assert!(read_config(&path).unwrap_err().is_missing_file());

        let config = load_config(&path);
        assert_eq!(config.language, Language::English);
        assert!(config.speech_enabled);
        assert_eq!(config.reply.mode, ReplyMode::Random);
        assert_eq!(config.reply.candidates.len(), 4);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assistant.json");
        fs::write(
            &path,
            r#"{ "language": "es", "reply": { "mode": "fixed", "delay_ms": 10 } }"#,
        )
        .unwrap();

        let config = load_config(&path);
        assert_eq!(config.language, Language::Spanish);
        assert_eq!(config.reply.mode, ReplyMode::Fixed);
        assert_eq!(config.reply.delay_ms, 10);
        assert_eq!(config.reply.fixed_reply, DEFAULT_FIXED_REPLY);
        assert_eq!(config.export_path, Path::new(DEFAULT_EXPORT_PATH));
        assert_eq!(config.transcript_path, Path::new(DEFAULT_TRANSCRIPT_PATH));
    }

    #[test]
    fn unknown_language_falls_back_to_english() {
        let config: AppConfig = serde_json::from_str(r#"{ "language": "klingon" }"#).unwrap();
        assert_eq!(config.language, Language::English);
    }

    #[test]
    fn malformed_file_names_the_path_and_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assistant.json");
        fs::write(&path, "not json").unwrap();

        let err = read_config(&path).unwrap_err();
        assert!(matches!(err, AssistantError::ConfigFormat { .. }));
        assert!(!err.is_missing_file());
        assert!(err.to_string().contains("assistant.json"));

        assert!(load_config(&path).user_name.is_none());
    }

    #[test]
    fn save_then_load_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config/assistant.json");

        let config = AppConfig {
            user_name: Some("Shrutika".to_string()),
            speech_enabled: false,
            ..AppConfig::default()
        };
        save_config(&path, &config).unwrap();

        let loaded = read_config(&path).unwrap();
        assert_eq!(loaded.user_name.as_deref(), Some("Shrutika"));
        assert!(!loaded.speech_enabled);
    }
}
