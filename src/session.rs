//! Per-user session state and action handlers
//!
//! One explicit struct holds everything a single user's interaction
//! touches: the extracted document text, the summary, the raw and
//! parsed flashcards, and the quiz progress. The presentation layer
//! calls one handler per user action and renders the updated state.

use crate::error::AppError;
use crate::extract;
use crate::flashcards::{self, Flashcard};
use crate::quiz::{QuizPhase, QuizSession};
use crate::summarize::{self, SummaryOutcome};
use crate::tts;
use reqwest::Client;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Concatenated page text of the current document; empty if none
    pub document_text: String,
    pub summary: String,
    /// Raw model response, kept for the review sheet
    pub flashcards_text: String,
    pub flashcards: Vec<Flashcard>,
    pub quiz: QuizSession,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upload action: extract a PDF and make it the current document.
    /// Supersedes the previous document, summary, flashcards, and quiz.
    pub fn load_document(&mut self, path: &Path) -> Result<(), AppError> {
        let text = extract::extract_text(path)?;
        self.set_document_text(text);
        Ok(())
    }

    /// Install already-extracted text as the current document, resetting
    /// all derived state. Front ends that are not PDF-based enter here.
    pub fn set_document_text(&mut self, text: String) {
        self.document_text = text;
        self.summary.clear();
        self.flashcards_text.clear();
        self.flashcards.clear();
        self.quiz.reset();
    }

    pub fn has_document(&self) -> bool {
        !self.document_text.trim().is_empty()
    }

    /// Summarize action. Stores the summary and returns the full
    /// outcome so the caller can report skipped chunks.
    pub async fn summarize_document(&mut self, client: &Client) -> SummaryOutcome {
        let outcome = summarize::summarize(client, &self.document_text).await;
        self.summary = outcome.summary.clone();
        outcome
    }

    /// Flashcards action: one generation request, then parse. A failed
    /// request leaves an empty set and is reported to the caller.
    pub async fn build_flashcards(&mut self, client: &Client) -> Result<(), AppError> {
        match flashcards::generate_flashcards(client, &self.document_text).await {
            Ok(raw) => {
                self.install_flashcards(raw);
                Ok(())
            }
            Err(e) => {
                self.install_flashcards(String::new());
                Err(e)
            }
        }
    }

    /// Replace the flashcard set and reset the quiz session
    pub fn install_flashcards(&mut self, raw: String) {
        self.flashcards = flashcards::parse_flashcards(&raw);
        self.flashcards_text = raw;
        self.quiz.reset();
    }

    /// Speech action: synthesize the stored summary to `out_path`
    pub async fn speak_summary(&self, client: &Client, out_path: &Path) -> Result<PathBuf, AppError> {
        tts::synthesize(client, &self.summary, out_path).await
    }

    // Quiz actions delegate to the state machine with this session's cards

    pub fn start_quiz(&mut self) {
        if !self.flashcards.is_empty() {
            self.quiz.start();
        }
    }

    pub fn submit_answer(&mut self, answer: &str) {
        self.quiz.submit(&self.flashcards, answer);
    }

    pub fn next_question(&mut self) {
        self.quiz.advance(&self.flashcards);
    }

    pub fn restart_quiz(&mut self) {
        if !self.flashcards.is_empty() {
            self.quiz.start();
        }
    }

    pub fn current_card(&self) -> Option<&Flashcard> {
        self.flashcards.get(self.quiz.index)
    }

    pub fn phase(&self) -> QuizPhase {
        self.quiz.phase(self.flashcards.len())
    }
}
