//! Core data model types for quizdrill.
//!
//! These are the fundamental types the whole system uses to represent a
//! loaded quiz and its running score.

use serde::{Deserialize, Serialize};

/// A single prompt/expected-answer pair loaded from one input row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The text shown to the user.
    pub prompt: String,
    /// The expected answer, compared verbatim.
    pub answer: String,
}

impl Question {
    pub fn new(prompt: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            answer: answer.into(),
        }
    }

    /// Grade a candidate answer against the expected one.
    ///
    /// Exact byte equality: case, leading/trailing spaces, and embedded
    /// whitespace are all significant. The candidate is expected to already
    /// have its line terminator stripped.
    pub fn grade(&self, candidate: &str) -> bool {
        candidate == self.answer
    }
}

/// An ordered quiz plus its running score counters.
///
/// The counters are private: they start at zero, only move through
/// [`Quiz::record`], and `correct + incorrect` never exceeds the number of
/// questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    /// Short name for the quiz, usually the source file stem.
    pub name: String,
    /// Questions in file order.
    pub questions: Vec<Question>,
    correct: u32,
    incorrect: u32,
}

impl Quiz {
    /// Create a quiz with zeroed counters.
    pub fn new(name: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            name: name.into(),
            questions,
            correct: 0,
            incorrect: 0,
        }
    }

    /// Number of questions loaded.
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }

    pub fn incorrect(&self) -> u32 {
        self.incorrect
    }

    /// Record one graded answer.
    ///
    /// Callers must record at most one outcome per question.
    pub fn record(&mut self, correct: bool) {
        debug_assert!(
            ((self.correct + self.incorrect) as usize) < self.total(),
            "more outcomes recorded than questions"
        );
        if correct {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }
    }

    /// True once every question has an outcome.
    pub fn is_complete(&self) -> bool {
        (self.correct + self.incorrect) as usize == self.total()
    }

    /// Snapshot the counters.
    pub fn tally(&self) -> Tally {
        Tally {
            correct: self.correct,
            incorrect: self.incorrect,
            total: self.total() as u32,
        }
    }
}

/// Final (or in-progress) score snapshot for one quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub correct: u32,
    pub incorrect: u32,
    pub total: u32,
}

impl Tally {
    /// Fraction of questions answered correctly, 0.0 for an empty quiz.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            f64::from(self.correct) / f64::from(self.total)
        }
    }
}
