//! Flashcard generation and Q:/A: parsing
//!
//! One generation request asks the model for 15 flashcards in a fixed
//! `Q:` / `A:` layout. The parser extracts every question/answer pair
//! from the raw response; malformed blocks are dropped silently.

use crate::ai_client;
use crate::error::AppError;
use crate::settings;
use crate::utils::safe_truncate;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Input longer than this is silently truncated before the request
const MAX_INPUT_CHARS: usize = 4000;

/// A question/answer pair parsed from generated study material
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
}

/// Request flashcards for `text` and return the raw model response.
///
/// No retry; a failed request is reported to the caller, which keeps an
/// empty flashcard set.
pub async fn generate_flashcards(client: &Client, text: &str) -> Result<String, AppError> {
    let model = settings::flashcard_model();
    let input = safe_truncate(text, MAX_INPUT_CHARS);
    let prompt = format!(
        "Create 15 flashcards in Q: / A: format from the following text:\n{}",
        input
    );
    ai_client::generate_text(client, &model, &prompt).await
}

/// Parse every `Q: ... A: ...` pair out of a raw model response.
///
/// A block starts at a `Q:` marker at the start of the input or of a
/// line; the first `A:` inside the block splits question from answer;
/// the answer runs to the next line-start `Q:` or the end of input, so
/// it may span newlines. Blocks without an `A:` are skipped.
pub fn parse_flashcards(raw: &str) -> Vec<Flashcard> {
    let mut cards = Vec::new();

    for block in question_blocks(raw) {
        if let Some((question, answer)) = block.split_once("A:") {
            let question = question.trim();
            let answer = answer.trim();
            if !question.is_empty() {
                cards.push(Flashcard {
                    question: question.to_string(),
                    answer: answer.to_string(),
                });
            }
        }
    }

    cards
}

/// Split raw text into blocks, each starting just after a line-start
/// `Q:` marker and running to the next one.
fn question_blocks(raw: &str) -> Vec<&str> {
    let mut starts = Vec::new();
    if let Some(rest) = raw.strip_prefix("Q:") {
        // offset of the text after the leading marker
        starts.push(raw.len() - rest.len());
    }
    let mut search_from = 0;
    while let Some(pos) = raw[search_from..].find("\nQ:") {
        let marker = search_from + pos;
        starts.push(marker + "\nQ:".len());
        search_from = marker + 1;
    }

    let mut blocks = Vec::new();
    for (i, &start) in starts.iter().enumerate() {
        let end = if i + 1 < starts.len() {
            // back up over the "\nQ:" that opens the next block
            starts[i + 1] - "\nQ:".len()
        } else {
            raw.len()
        };
        blocks.push(&raw[start..end]);
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_pairs_in_order() {
        let raw = "Q: What is 2+2?\nA: 4\nQ: Capital of France?\nA: Paris\n";
        let cards = parse_flashcards(raw);
        assert_eq!(
            cards,
            vec![
                Flashcard {
                    question: "What is 2+2?".to_string(),
                    answer: "4".to_string(),
                },
                Flashcard {
                    question: "Capital of France?".to_string(),
                    answer: "Paris".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_no_markers_yields_empty_list() {
        assert!(parse_flashcards("The model refused to cooperate.").is_empty());
        assert!(parse_flashcards("").is_empty());
    }

    #[test]
    fn test_answer_may_span_newlines() {
        let raw = "Q: Define photosynthesis\nA: The process by which plants\nconvert light to energy.\nQ: Next?\nA: Yes";
        let cards = parse_flashcards(raw);
        assert_eq!(cards.len(), 2);
        assert_eq!(
            cards[0].answer,
            "The process by which plants\nconvert light to energy."
        );
    }

    #[test]
    fn test_question_and_answer_on_same_line() {
        let cards = parse_flashcards("Q: What is 2+2? A: 4");
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].question, "What is 2+2?");
        assert_eq!(cards[0].answer, "4");
    }

    #[test]
    fn test_block_without_answer_is_dropped() {
        let raw = "Q: Orphaned question with no answer\nQ: Real one?\nA: Indeed";
        let cards = parse_flashcards(raw);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].question, "Real one?");
    }

    #[test]
    fn test_surrounding_prose_is_ignored() {
        let raw = "Here are your flashcards!\n\nQ: One?\nA: 1\n\nGood luck studying!";
        let cards = parse_flashcards(raw);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].answer, "1\n\nGood luck studying!");
    }

    #[test]
    fn test_answers_are_trimmed() {
        let cards = parse_flashcards("Q: Spacing?\nA:   padded   \n");
        assert_eq!(cards[0].answer, "padded");
    }
}
