//! Error kinds for backend operations
//!
//! Every backend-calling function returns one of these instead of
//! printing; the presentation layer decides how to surface them.
//! Parse misses (model output not matching the Q:/A: layout) are not
//! errors and simply yield fewer flashcards.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// The PDF could not be read or decoded at all. Individual pages
    /// without extractable text are not errors.
    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    /// A request to the generative-text service failed (HTTP error,
    /// service error, or unusable response body).
    #[error("generation request failed: {0}")]
    Generation(String),

    /// Speech synthesis failed; no audio artifact was produced.
    #[error("speech synthesis failed: {0}")]
    Synthesis(String),

    /// Settings could not be read or written.
    #[error("settings error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
