//! EduMate core library
//!
//! PDF study assistant: extract text, summarize and generate flashcards
//! through a generative-text service, quiz the user, and optionally
//! read the summary aloud. The CLI in `src/bin/cli.rs` is the
//! presentation layer; all behavior lives here.

pub mod ai_client;
pub mod chunker;
pub mod error;
pub mod extract;
pub mod flashcards;
pub mod quiz;
pub mod session;
pub mod settings;
pub mod summarize;
pub mod tts;
pub mod utils;
