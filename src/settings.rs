//! Application settings storage
//!
//! Stores configuration like the Gemini API key in a JSON file in the
//! app data directory. The `GEMINI_API_KEY` environment variable takes
//! precedence over the stored key.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

/// Global settings instance
static SETTINGS: RwLock<Option<Settings>> = RwLock::new(None);

/// Path to config file (set during init)
static CONFIG_PATH: RwLock<Option<PathBuf>> = RwLock::new(None);

/// Accumulated generative-service token usage across runs
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UsageStats {
    #[serde(default)]
    pub total_prompt_tokens: u64,
    #[serde(default)]
    pub total_candidate_tokens: u64,
    #[serde(default)]
    pub generation_requests: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub gemini_api_key: Option<String>,
    /// Model used for summarization requests
    #[serde(default = "default_model")]
    pub summary_model: String,
    /// Model used for flashcard generation requests
    #[serde(default = "default_model")]
    pub flashcard_model: String,
    /// Where the spoken-summary MP3 is written (overwritten each call)
    #[serde(default = "default_tts_output")]
    pub tts_output_path: String,
    #[serde(default)]
    pub usage: UsageStats,
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_tts_output() -> String {
    "output.mp3".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            summary_model: default_model(),
            flashcard_model: default_model(),
            tts_output_path: default_tts_output(),
            usage: UsageStats::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk or create default
    fn load(path: &PathBuf) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
                Err(_) => Settings::default(),
            }
        } else {
            Settings::default()
        }
    }

    /// Save settings to disk
    fn save(&self, path: &PathBuf) -> Result<(), AppError> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::Config(format!("Failed to serialize settings: {}", e)))?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| AppError::Config(format!("Failed to create config directory: {}", e)))?;
        }

        fs::write(path, content)
            .map_err(|e| AppError::Config(format!("Failed to write settings: {}", e)))?;

        Ok(())
    }
}

/// Initialize settings with the app data directory
pub fn init(app_data_dir: PathBuf) {
    let config_path = app_data_dir.join("settings.json");
    let settings = Settings::load(&config_path);

    *CONFIG_PATH.write().unwrap() = Some(config_path);
    *SETTINGS.write().unwrap() = Some(settings);
}

/// Get the current API key (checks env var first, then stored setting)
pub fn get_api_key() -> Option<String> {
    // Environment variable takes precedence
    if let Ok(key) = std::env::var("GEMINI_API_KEY") {
        if !key.is_empty() {
            return Some(key);
        }
    }

    // Fall back to stored setting
    let guard = SETTINGS.read().ok()?;
    let settings = guard.as_ref()?;
    settings.gemini_api_key.clone()
}

/// Check if an API key is available
pub fn has_api_key() -> bool {
    get_api_key().map(|k| !k.is_empty()).unwrap_or(false)
}

/// Set and save the API key. An empty key clears the stored value.
pub fn set_api_key(key: String) -> Result<(), AppError> {
    with_settings_mut(|settings| {
        settings.gemini_api_key = if key.is_empty() { None } else { Some(key) };
    })
}

/// Get masked API key for display (shows first/last chars only)
pub fn get_masked_api_key() -> Option<String> {
    let guard = SETTINGS.read().ok()?;
    let settings = guard.as_ref()?;
    settings.gemini_api_key.as_deref().map(mask_key)
}

fn mask_key(key: &str) -> String {
    if key.len() > 12 {
        format!("{}...{}", &key[..8], &key[key.len() - 4..])
    } else {
        "*".repeat(key.len())
    }
}

/// Model name for summarization requests
pub fn summary_model() -> String {
    read_or_default(|s| s.summary_model.clone())
}

/// Model name for flashcard generation requests
pub fn flashcard_model() -> String {
    read_or_default(|s| s.flashcard_model.clone())
}

/// Output path for the spoken-summary artifact
pub fn tts_output_path() -> PathBuf {
    PathBuf::from(read_or_default(|s| s.tts_output_path.clone()))
}

/// Record token usage reported by the generative service
pub fn add_gemini_tokens(prompt_tokens: u64, candidate_tokens: u64) -> Result<(), AppError> {
    with_settings_mut(|settings| {
        settings.usage.total_prompt_tokens += prompt_tokens;
        settings.usage.total_candidate_tokens += candidate_tokens;
        settings.usage.generation_requests += 1;
    })
}

/// Snapshot of accumulated usage stats
pub fn usage_stats() -> UsageStats {
    read_or_default(|s| s.usage.clone())
}

fn read_or_default<T>(f: impl Fn(&Settings) -> T) -> T {
    let guard = SETTINGS.read().ok();
    match guard.as_ref().and_then(|g| g.as_ref()) {
        Some(settings) => f(settings),
        None => f(&Settings::default()),
    }
}

fn with_settings_mut(f: impl FnOnce(&mut Settings)) -> Result<(), AppError> {
    let mut settings_guard = SETTINGS
        .write()
        .map_err(|_| AppError::Config("Failed to acquire settings lock".to_string()))?;

    let settings = settings_guard.get_or_insert_with(Settings::default);
    f(settings);

    let config_path = CONFIG_PATH
        .read()
        .map_err(|_| AppError::Config("Failed to acquire config path lock".to_string()))?
        .clone()
        .ok_or_else(|| AppError::Config("Settings not initialized".to_string()))?;

    settings.save(&config_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("short"), "*****");
        assert_eq!(mask_key("AIzaSyABCDEF1234"), "AIzaSyAB...1234");
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("settings.json"));
        assert!(settings.gemini_api_key.is_none());
        assert_eq!(settings.summary_model, "gemini-1.5-flash");
        assert_eq!(settings.tts_output_path, "output.mp3");
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut settings = Settings::default();
        settings.gemini_api_key = Some("test-key".to_string());
        settings.usage.generation_requests = 3;
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path);
        assert_eq!(loaded.gemini_api_key.as_deref(), Some("test-key"));
        assert_eq!(loaded.usage.generation_requests, 3);
    }

    #[test]
    fn test_load_corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        let settings = Settings::load(&path);
        assert!(settings.gemini_api_key.is_none());
    }
}
