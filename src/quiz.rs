//! Quiz session state machine
//!
//! Holds position, score, and feedback for one pass over a flashcard
//! set. Every transition is user-triggered; nothing advances on a
//! timer. The card list itself lives in the surrounding session; the
//! quiz only tracks progress through it.

use crate::flashcards::Flashcard;
use crate::utils::normalize_answer;
use serde::{Deserialize, Serialize};

pub const FEEDBACK_CORRECT: &str = "Correct!";
pub const FEEDBACK_INCORRECT: &str = "Incorrect!";

/// Derived view of the state machine, computed from the flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// No flashcards exist
    Idle,
    /// Flashcards exist, quiz not started
    Ready,
    /// A question is being asked
    Active,
    /// Feedback shown, awaiting "next"
    Answered,
    /// All questions exhausted; final score available
    Done,
}

/// Progress through one quiz run.
///
/// Invariants: `index` stays in `[0, card_count]`; `done` is set exactly
/// when advancing lands on `card_count`; `active` and `done` are never
/// both set outside the transient restart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuizSession {
    pub index: usize,
    pub score: usize,
    pub active: bool,
    pub done: bool,
    pub feedback: String,
    pub revealed_answer: String,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all progress, back to idle/ready
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Begin a run from the first question. Also serves restart-from-done.
    pub fn start(&mut self) {
        self.index = 0;
        self.score = 0;
        self.active = true;
        self.done = false;
        self.feedback.clear();
        self.revealed_answer.clear();
    }

    /// Judge a submitted answer against the current card.
    ///
    /// Comparison is case-insensitive and whitespace-trimmed. A correct
    /// answer scores a point; an incorrect one reveals the stored answer.
    pub fn submit(&mut self, cards: &[Flashcard], answer: &str) {
        let Some(card) = cards.get(self.index) else {
            return;
        };
        if normalize_answer(answer) == normalize_answer(&card.answer) {
            self.score += 1;
            self.feedback = FEEDBACK_CORRECT.to_string();
            self.revealed_answer.clear();
        } else {
            self.feedback = FEEDBACK_INCORRECT.to_string();
            self.revealed_answer = card.answer.clone();
        }
    }

    /// Move to the next question, or finish the run after the last one.
    pub fn advance(&mut self, cards: &[Flashcard]) {
        if self.done {
            return;
        }
        self.index += 1;
        if self.index >= cards.len() {
            self.done = true;
            self.active = false;
        }
        self.feedback.clear();
        self.revealed_answer.clear();
    }

    pub fn phase(&self, card_count: usize) -> QuizPhase {
        if card_count == 0 {
            QuizPhase::Idle
        } else if self.done {
            QuizPhase::Done
        } else if !self.active {
            QuizPhase::Ready
        } else if !self.feedback.is_empty() {
            QuizPhase::Answered
        } else {
            QuizPhase::Active
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards() -> Vec<Flashcard> {
        vec![
            Flashcard {
                question: "Capital of France?".to_string(),
                answer: "paris".to_string(),
            },
            Flashcard {
                question: "2+2?".to_string(),
                answer: "4".to_string(),
            },
        ]
    }

    #[test]
    fn test_phases_before_start() {
        let quiz = QuizSession::new();
        assert_eq!(quiz.phase(0), QuizPhase::Idle);
        assert_eq!(quiz.phase(2), QuizPhase::Ready);
    }

    #[test]
    fn test_case_and_whitespace_insensitive_match() {
        let cards = cards();
        let mut quiz = QuizSession::new();
        quiz.start();
        quiz.submit(&cards, "  Paris ");
        assert_eq!(quiz.feedback, FEEDBACK_CORRECT);
        assert_eq!(quiz.score, 1);
        assert!(quiz.revealed_answer.is_empty());
    }

    #[test]
    fn test_wrong_answer_reveals_stored_answer() {
        let cards = cards();
        let mut quiz = QuizSession::new();
        quiz.start();
        quiz.submit(&cards, "London");
        assert_eq!(quiz.feedback, FEEDBACK_INCORRECT);
        assert_eq!(quiz.score, 0);
        assert_eq!(quiz.revealed_answer, "paris");
        assert_eq!(quiz.phase(cards.len()), QuizPhase::Answered);
    }

    #[test]
    fn test_advance_clears_feedback() {
        let cards = cards();
        let mut quiz = QuizSession::new();
        quiz.start();
        quiz.submit(&cards, "wrong");
        quiz.advance(&cards);
        assert!(quiz.feedback.is_empty());
        assert!(quiz.revealed_answer.is_empty());
        assert_eq!(quiz.index, 1);
        assert_eq!(quiz.phase(cards.len()), QuizPhase::Active);
    }

    #[test]
    fn test_advancing_past_last_card_finishes_and_keeps_score() {
        let cards = cards();
        let mut quiz = QuizSession::new();
        quiz.start();
        quiz.submit(&cards, "paris");
        quiz.advance(&cards);
        quiz.submit(&cards, "4");
        quiz.advance(&cards);
        assert!(quiz.done);
        assert!(!quiz.active);
        assert_eq!(quiz.score, 2);
        assert_eq!(quiz.index, cards.len());
        assert_eq!(quiz.phase(cards.len()), QuizPhase::Done);
    }

    #[test]
    fn test_restart_from_done_resets_progress() {
        let cards = cards();
        let mut quiz = QuizSession::new();
        quiz.start();
        quiz.submit(&cards, "paris");
        quiz.advance(&cards);
        quiz.submit(&cards, "4");
        quiz.advance(&cards);
        assert!(quiz.done);

        quiz.start();
        assert_eq!(quiz.index, 0);
        assert_eq!(quiz.score, 0);
        assert!(quiz.active);
        assert!(!quiz.done);
        assert_eq!(quiz.phase(cards.len()), QuizPhase::Active);
    }

    #[test]
    fn test_advance_after_done_is_a_no_op() {
        let cards = cards();
        let mut quiz = QuizSession::new();
        quiz.start();
        quiz.advance(&cards);
        quiz.advance(&cards);
        assert!(quiz.done);
        let index_at_done = quiz.index;
        quiz.advance(&cards);
        assert_eq!(quiz.index, index_at_done);
    }

    #[test]
    fn test_submit_with_no_cards_does_nothing() {
        let mut quiz = QuizSession::new();
        quiz.start();
        quiz.submit(&[], "anything");
        assert!(quiz.feedback.is_empty());
        assert_eq!(quiz.score, 0);
    }
}
