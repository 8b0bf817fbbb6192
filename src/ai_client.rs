//! Google Gemini API client for text generation
//!
//! Single entry point (`generate_text`) used by the summarizer and the
//! flashcard generator: free-text prompt in, free-text response out.
//! Token usage reported by the service is recorded into settings.

use crate::error::AppError;
use crate::settings;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini generateContent request format
#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

/// Gemini generateContent response format
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct UsageMetadata {
    #[serde(rename = "promptTokenCount", default)]
    prompt_token_count: u64,
    #[serde(rename = "candidatesTokenCount", default)]
    candidates_token_count: u64,
}

/// Check if generation is available (API key is set)
pub fn is_available() -> bool {
    settings::has_api_key()
}

/// Build the shared HTTP client. One per process; every backend call
/// blocks on it until the response or this timeout.
pub fn http_client() -> Result<Client, AppError> {
    Client::builder()
        .timeout(Duration::from_secs(60))
        .user_agent("edumate/0.1")
        .build()
        .map_err(|e| AppError::Generation(format!("Failed to create HTTP client: {}", e)))
}

/// Send one prompt to the given model and return the response text, trimmed.
pub async fn generate_text(client: &Client, model: &str, prompt: &str) -> Result<String, AppError> {
    let api_key = settings::get_api_key()
        .ok_or_else(|| AppError::Generation("GEMINI_API_KEY not set".to_string()))?;

    let request = GenerateRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: prompt.to_string(),
            }],
        }],
    };

    let url = format!("{}/models/{}:generateContent", API_BASE, model);
    let response = client
        .post(&url)
        .header("x-goog-api-key", &api_key)
        .header("content-type", "application/json")
        .json(&request)
        .send()
        .await
        .map_err(|e| AppError::Generation(format!("HTTP request failed: {}", e)))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::Generation(format!("API error {}: {}", status, body)));
    }

    let api_response: GenerateResponse = response
        .json()
        .await
        .map_err(|e| AppError::Generation(format!("Failed to parse response: {}", e)))?;

    // Track token usage
    if let Some(usage) = &api_response.usage_metadata {
        let _ = settings::add_gemini_tokens(usage.prompt_token_count, usage.candidates_token_count);
    }

    response_text(&api_response)
        .ok_or_else(|| AppError::Generation("response contained no candidates".to_string()))
}

/// Concatenated text of the first candidate's parts, trimmed
fn response_text(response: &GenerateResponse) -> Option<String> {
    let content = response.candidates.first()?.content.as_ref()?;
    let text: String = content
        .parts
        .iter()
        .map(|p| p.text.as_str())
        .collect::<Vec<_>>()
        .join("");
    Some(text.trim().to_string())
}
