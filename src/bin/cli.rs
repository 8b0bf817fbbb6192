//! EduMate CLI - AI summarization assistant & quiz for PDF documents
//!
//! Usage: edumate-cli <COMMAND>
//!
//! Summaries and flashcards come from the Gemini API. Set GEMINI_API_KEY
//! or store a key with `edumate-cli key set <key>`.

use clap::{Parser, Subcommand};
use edumate_lib::quiz::QuizPhase;
use edumate_lib::{ai_client, session::Session, settings, utils};
use reqwest::Client;
use std::io::Write as _;
use std::path::{Path, PathBuf};

// ============================================================================
// Argument parsing
// ============================================================================

#[derive(Parser)]
#[command(
    name = "edumate-cli",
    about = "AI summarization assistant & quiz for PDF documents",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the text extracted from a PDF (first 1000 chars by default)
    Text {
        pdf: PathBuf,
        /// Print the whole document instead of a preview
        #[arg(long)]
        full: bool,
    },
    /// Summarize a PDF
    Summarize { pdf: PathBuf },
    /// Generate flashcards from a PDF and print the review sheet
    Flashcards { pdf: PathBuf },
    /// Summarize a PDF and render the summary to an MP3 file
    Speak {
        pdf: PathBuf,
        /// Output file (defaults to the configured tts_output_path)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Generate flashcards from a PDF and run an interactive quiz
    Quiz { pdf: PathBuf },
    /// Manage the Gemini API key
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },
    /// Show accumulated generation token usage
    Usage,
}

#[derive(Subcommand)]
enum KeyAction {
    /// Store an API key in the settings file
    Set { key: String },
    /// Show the stored key, masked
    Show,
    /// Remove the stored key
    Clear,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let data_dir = dirs::data_dir()
        .map(|p| p.join("edumate"))
        .unwrap_or_else(|| PathBuf::from("."));
    settings::init(data_dir);

    let result = match cli.command {
        Commands::Text { pdf, full } => cmd_text(&pdf, full),
        Commands::Summarize { pdf } => cmd_summarize(&pdf).await,
        Commands::Flashcards { pdf } => cmd_flashcards(&pdf).await,
        Commands::Speak { pdf, out } => cmd_speak(&pdf, out).await,
        Commands::Quiz { pdf } => cmd_quiz(&pdf).await,
        Commands::Key { action } => cmd_key(action),
        Commands::Usage => cmd_usage(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

// ============================================================================
// Commands
// ============================================================================

fn cmd_text(pdf: &Path, full: bool) -> Result<(), String> {
    let session = load_session(pdf)?;
    if full {
        println!("{}", session.document_text);
    } else {
        println!("{}", utils::preview(&session.document_text, 1000));
    }
    Ok(())
}

async fn cmd_summarize(pdf: &Path) -> Result<(), String> {
    require_api_key()?;
    let client = http_client()?;
    let mut session = load_session(pdf)?;
    require_document(&session)?;

    summarize_into(&mut session, &client).await;
    println!("{}", session.summary);
    Ok(())
}

async fn cmd_flashcards(pdf: &Path) -> Result<(), String> {
    require_api_key()?;
    let client = http_client()?;
    let mut session = load_session(pdf)?;
    require_document(&session)?;

    println!("Creating flashcards...");
    session
        .build_flashcards(&client)
        .await
        .map_err(|e| format!("Error generating flashcards: {}", e))?;

    println!("\n{}", session.flashcards_text);
    eprintln!("[Flashcards] {} cards parsed", session.flashcards.len());
    Ok(())
}

async fn cmd_speak(pdf: &Path, out: Option<PathBuf>) -> Result<(), String> {
    require_api_key()?;
    let client = http_client()?;
    let mut session = load_session(pdf)?;
    require_document(&session)?;

    summarize_into(&mut session, &client).await;
    println!("{}\n", session.summary);

    let out_path = out.unwrap_or_else(settings::tts_output_path);
    println!("Synthesizing speech...");
    let written = session
        .speak_summary(&client, &out_path)
        .await
        .map_err(|e| format!("TTS failed: {}", e))?;
    println!("Audio written to {}", written.display());
    Ok(())
}

async fn cmd_quiz(pdf: &Path) -> Result<(), String> {
    require_api_key()?;
    let client = http_client()?;
    let mut session = load_session(pdf)?;
    require_document(&session)?;

    println!("Creating flashcards...");
    session
        .build_flashcards(&client)
        .await
        .map_err(|e| format!("Error generating flashcards: {}", e))?;

    if session.flashcards.is_empty() {
        eprintln!("[Flashcards] Model output did not contain Q:/A: pairs:");
        eprintln!("{}", session.flashcards_text);
        return Err("No flashcards could be parsed from the model output.".to_string());
    }

    println!("\nFlashcards Review");
    println!("-----------------");
    println!("{}\n", session.flashcards_text);

    prompt_line("Press Enter to start the quiz")?;
    session.start_quiz();

    run_quiz_loop(&mut session)
}

fn run_quiz_loop(session: &mut Session) -> Result<(), String> {
    loop {
        match session.phase() {
            QuizPhase::Active => {
                let total = session.flashcards.len();
                let number = session.quiz.index + 1;
                let question = session
                    .current_card()
                    .map(|c| c.question.clone())
                    .ok_or("quiz has no current card")?;
                println!("\nQuestion {} of {}:", number, total);
                println!("{}", question);
                let answer = prompt_line("Your answer: ")?;
                session.submit_answer(&answer);
            }
            QuizPhase::Answered => {
                println!("{}", session.quiz.feedback);
                if !session.quiz.revealed_answer.is_empty() {
                    println!("Correct Answer: {}", session.quiz.revealed_answer);
                }
                prompt_line("Press Enter for the next question")?;
                session.next_question();
            }
            QuizPhase::Done => {
                println!(
                    "\nQuiz completed! Your score: {}/{}",
                    session.quiz.score,
                    session.flashcards.len()
                );
                let again = prompt_line("Restart quiz? [y/N] ")?;
                if again.trim().eq_ignore_ascii_case("y") {
                    session.restart_quiz();
                } else {
                    return Ok(());
                }
            }
            QuizPhase::Ready | QuizPhase::Idle => return Ok(()),
        }
    }
}

fn cmd_key(action: KeyAction) -> Result<(), String> {
    match action {
        KeyAction::Set { key } => {
            settings::set_api_key(key).map_err(|e| e.to_string())?;
            println!("API key saved to settings");
        }
        KeyAction::Show => {
            if std::env::var("GEMINI_API_KEY").map(|k| !k.is_empty()).unwrap_or(false) {
                println!("GEMINI_API_KEY environment variable is set (takes precedence)");
            }
            match settings::get_masked_api_key() {
                Some(masked) => println!("Stored key: {}", masked),
                None => println!("No key stored"),
            }
        }
        KeyAction::Clear => {
            settings::set_api_key(String::new()).map_err(|e| e.to_string())?;
            println!("API key cleared");
        }
    }
    Ok(())
}

fn cmd_usage() -> Result<(), String> {
    let usage = settings::usage_stats();
    println!("Generation requests: {}", usage.generation_requests);
    println!("Prompt tokens:       {}", usage.total_prompt_tokens);
    println!("Candidate tokens:    {}", usage.total_candidate_tokens);
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

fn http_client() -> Result<Client, String> {
    ai_client::http_client().map_err(|e| e.to_string())
}

fn require_api_key() -> Result<(), String> {
    if !ai_client::is_available() {
        return Err(
            "API key not found. Set GEMINI_API_KEY or run `edumate-cli key set <key>`".to_string(),
        );
    }
    Ok(())
}

fn load_session(pdf: &Path) -> Result<Session, String> {
    let mut session = Session::new();
    eprintln!("[Extract] Reading {}...", pdf.display());
    session.load_document(pdf).map_err(|e| e.to_string())?;
    if !session.has_document() {
        eprintln!("[Extract] No text extracted from PDF.");
    }
    Ok(session)
}

fn require_document(session: &Session) -> Result<(), String> {
    if session.has_document() {
        Ok(())
    } else {
        Err("No text extracted from PDF.".to_string())
    }
}

/// Run a summarization pass, reporting skipped chunks to stderr
async fn summarize_into(session: &mut Session, client: &Client) {
    println!("Summarizing...");
    let outcome = session.summarize_document(client).await;
    for err in &outcome.chunk_errors {
        eprintln!(
            "[Summary] Error generating summary for chunk {}: {}",
            err.chunk, err.message
        );
    }
    if let Some(e) = &outcome.combine_error {
        eprintln!(
            "[Summary] Combination request failed, falling back to concatenated chunk summaries: {}",
            e
        );
    }
}

fn prompt_line(prompt: &str) -> Result<String, String> {
    print!("{}", prompt);
    std::io::stdout().flush().map_err(|e| e.to_string())?;
    let mut input = String::new();
    std::io::stdin()
        .read_line(&mut input)
        .map_err(|e| e.to_string())?;
    Ok(input.trim_end_matches(['\n', '\r']).to_string())
}
