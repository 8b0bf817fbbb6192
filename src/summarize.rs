//! Map/reduce summarization over document chunks
//!
//! Each chunk gets an independent summarization request; failed chunks
//! are skipped and reported, never fatal. Multiple chunk summaries are
//! combined with one further request, falling back to naive
//! concatenation if the combination request fails.

use crate::ai_client;
use crate::chunker::{chunk_text, DEFAULT_CHUNK_CHARS};
use crate::settings;
use reqwest::Client;

/// Sentinel returned when no chunk summary could be produced
pub const NO_SUMMARY: &str = "Could not generate summary.";

/// A summarization request that failed for one chunk
#[derive(Debug, Clone)]
pub struct ChunkError {
    /// 1-based chunk number
    pub chunk: usize,
    pub message: String,
}

/// Result of a summarization run. Partial failures leave a usable
/// summary built from the chunks that succeeded.
#[derive(Debug, Clone)]
pub struct SummaryOutcome {
    pub summary: String,
    pub chunk_errors: Vec<ChunkError>,
    /// Set when the combination request failed and the summary fell
    /// back to concatenated chunk summaries
    pub combine_error: Option<String>,
}

/// What to do with the collected chunk summaries
enum ReduceStep {
    Sentinel,
    Single(String),
    /// Needs a combination request; holds the naive concatenation used
    /// both as prompt input and as the fallback result
    Combine(String),
}

fn reduce_step(mut summaries: Vec<String>) -> ReduceStep {
    match summaries.len() {
        0 => ReduceStep::Sentinel,
        1 => ReduceStep::Single(summaries.remove(0)),
        _ => ReduceStep::Combine(summaries.join(" ")),
    }
}

/// Summarize `text`, chunking it to the default budget.
pub async fn summarize(client: &Client, text: &str) -> SummaryOutcome {
    let model = settings::summary_model();
    let chunks = chunk_text(text, DEFAULT_CHUNK_CHARS);

    let mut summaries = Vec::new();
    let mut chunk_errors = Vec::new();
    for (i, chunk) in chunks.iter().enumerate() {
        let prompt = format!("Please provide a concise summary:\n\n{}", chunk);
        match ai_client::generate_text(client, &model, &prompt).await {
            Ok(summary) => summaries.push(summary),
            Err(e) => chunk_errors.push(ChunkError {
                chunk: i + 1,
                message: e.to_string(),
            }),
        }
    }

    match reduce_step(summaries) {
        ReduceStep::Sentinel => SummaryOutcome {
            summary: NO_SUMMARY.to_string(),
            chunk_errors,
            combine_error: None,
        },
        ReduceStep::Single(summary) => SummaryOutcome {
            summary,
            chunk_errors,
            combine_error: None,
        },
        ReduceStep::Combine(concatenated) => {
            let prompt = format!("Combine into one cohesive summary:\n\n{}", concatenated);
            match ai_client::generate_text(client, &model, &prompt).await {
                Ok(combined) => SummaryOutcome {
                    summary: combined,
                    chunk_errors,
                    combine_error: None,
                },
                Err(e) => SummaryOutcome {
                    summary: concatenated,
                    chunk_errors,
                    combine_error: Some(e.to_string()),
                },
            }
        }
    }
}
