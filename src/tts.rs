//! Text-to-speech synthesis
//!
//! Renders a summary to one MP3 file via the Google Translate TTS
//! endpoint. The endpoint caps query length, so the text is split into
//! word-aligned parts and the MP3 payloads are concatenated. The
//! artifact is overwritten on each call; nothing is written unless
//! every part was fetched.

use crate::chunker::chunk_text;
use crate::error::AppError;
use reqwest::Client;
use std::path::{Path, PathBuf};

const TTS_ENDPOINT: &str = "https://translate.google.com/translate_tts";
const TTS_LANG: &str = "en";

/// Per-request character cap accepted by the endpoint
const MAX_PART_CHARS: usize = 200;

/// Convert `text` to speech and write the MP3 to `out_path`.
pub async fn synthesize(client: &Client, text: &str, out_path: &Path) -> Result<PathBuf, AppError> {
    if text.trim().is_empty() {
        return Err(AppError::Synthesis("no text to speak".to_string()));
    }

    let parts = chunk_text(text, MAX_PART_CHARS);
    let mut audio: Vec<u8> = Vec::new();

    for part in &parts {
        let url = format!(
            "{}?ie=UTF-8&tl={}&client=tw-ob&q={}",
            TTS_ENDPOINT,
            TTS_LANG,
            urlencoding::encode(part)
        );

        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::Synthesis(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Synthesis(format!(
                "TTS service returned status {}",
                response.status()
            )));
        }

        // Make sure we got audio back, not an error page
        if let Some(content_type) = response.headers().get("content-type") {
            let content_type_str = content_type.to_str().unwrap_or("");
            if !content_type_str.contains("audio") {
                return Err(AppError::Synthesis(format!(
                    "TTS service returned non-audio content: {}",
                    content_type_str
                )));
            }
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::Synthesis(format!("Failed to read audio bytes: {}", e)))?;
        audio.extend_from_slice(&bytes);
    }

    std::fs::write(out_path, &audio)
        .map_err(|e| AppError::Synthesis(format!("Failed to write {}: {}", out_path.display(), e)))?;

    Ok(out_path.to_path_buf())
}
