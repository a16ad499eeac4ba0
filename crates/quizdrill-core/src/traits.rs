//! Trait seams between the scoring engine and the terminal.
//!
//! The engine never touches stdin or stdout directly: candidate answers come
//! from an [`AnswerSource`] and presentation goes through a [`QuizObserver`].
//! The CLI implements both over the console; tests drive the engine with
//! [`ScriptedSource`] and [`NoopObserver`].

use std::collections::VecDeque;

use crate::model::{Question, Quiz, Tally};
use crate::report::AnswerRecord;

// ---------------------------------------------------------------------------
// Answer source
// ---------------------------------------------------------------------------

/// Where candidate answers come from.
pub trait AnswerSource {
    /// Block until the user signals readiness. The content of whatever was
    /// entered is discarded.
    fn wait_until_ready(&mut self) -> anyhow::Result<()>;

    /// Read one candidate answer with its line terminator stripped.
    ///
    /// End of input yields the empty string; an empty line is a legitimate
    /// (empty) answer.
    fn read_answer(&mut self) -> anyhow::Result<String>;
}

// ---------------------------------------------------------------------------
// Observer
// ---------------------------------------------------------------------------

/// Presentation callbacks for one quiz run.
pub trait QuizObserver {
    /// The quiz is about to start. `time_limit_secs` is the advertised limit;
    /// it is informational only and never enforced.
    fn on_quiz_start(&self, quiz: &Quiz, time_limit_secs: u64);

    /// A question is being asked.
    fn on_question(&self, index: usize, question: &Question);

    /// An answer has been graded.
    fn on_answered(&self, record: &AnswerRecord);

    /// Every question has been visited.
    fn on_quiz_complete(&self, tally: &Tally);
}

/// No-op observer.
pub struct NoopObserver;

impl QuizObserver for NoopObserver {
    fn on_quiz_start(&self, _: &Quiz, _: u64) {}
    fn on_question(&self, _: usize, _: &Question) {}
    fn on_answered(&self, _: &AnswerRecord) {}
    fn on_quiz_complete(&self, _: &Tally) {}
}

// ---------------------------------------------------------------------------
// Scripted source
// ---------------------------------------------------------------------------

/// An [`AnswerSource`] fed from a fixed list, for driving the engine without
/// a terminal.
///
/// Once the script runs out, further reads return the empty string — the same
/// thing a closed stdin produces.
pub struct ScriptedSource {
    answers: VecDeque<String>,
    ready_waits: u32,
    reads: u32,
}

impl ScriptedSource {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            ready_waits: 0,
            reads: 0,
        }
    }

    /// How many times the ready gate was passed.
    pub fn ready_waits(&self) -> u32 {
        self.ready_waits
    }

    /// How many answers were read.
    pub fn reads(&self) -> u32 {
        self.reads
    }
}

impl AnswerSource for ScriptedSource {
    fn wait_until_ready(&mut self) -> anyhow::Result<()> {
        self.ready_waits += 1;
        Ok(())
    }

    fn read_answer(&mut self) -> anyhow::Result<String> {
        self.reads += 1;
        Ok(self.answers.pop_front().unwrap_or_default())
    }
}
