//! Interactive quiz engine.
//!
//! Administers a loaded quiz strictly in sequence: announce, gate on the
//! ready prompt, then ask every question exactly once, grading each answer by
//! exact equality. Fully synchronous; every read blocks until a line is
//! available.

use std::time::Instant;

use anyhow::Result;
use uuid::Uuid;

use crate::model::Quiz;
use crate::report::{AnswerRecord, QuizSummary, SessionReport};
use crate::traits::{AnswerSource, QuizObserver};

/// Configuration for the quiz engine.
#[derive(Debug, Clone)]
pub struct QuizEngineConfig {
    /// Time limit advertised in the start banner, in seconds.
    ///
    /// Informational only: no deadline is armed and answers are accepted
    /// however long they take.
    pub time_limit_secs: u64,
}

impl Default for QuizEngineConfig {
    fn default() -> Self {
        Self { time_limit_secs: 30 }
    }
}

/// The quiz engine.
pub struct QuizEngine {
    config: QuizEngineConfig,
}

impl QuizEngine {
    pub fn new(config: QuizEngineConfig) -> Self {
        Self { config }
    }

    /// Administer `quiz` and produce a session report.
    ///
    /// Every question is visited exactly once, so the final tally always
    /// satisfies `correct + incorrect == total`.
    pub fn run(
        &self,
        quiz: &mut Quiz,
        source: &mut dyn AnswerSource,
        observer: &dyn QuizObserver,
    ) -> Result<SessionReport> {
        let start = Instant::now();
        let session_id = Uuid::new_v4();

        observer.on_quiz_start(quiz, self.config.time_limit_secs);
        source.wait_until_ready()?;

        let mut results = Vec::with_capacity(quiz.total());
        for index in 0..quiz.total() {
            let question = quiz.questions[index].clone();
            observer.on_question(index, &question);

            let given = source.read_answer()?;
            let correct = question.grade(&given);
            quiz.record(correct);

            let record = AnswerRecord {
                index,
                prompt: question.prompt,
                expected: question.answer,
                given,
                correct,
            };
            observer.on_answered(&record);
            results.push(record);
        }

        let tally = quiz.tally();
        observer.on_quiz_complete(&tally);
        tracing::debug!(
            "session {} complete: {}/{} correct",
            session_id,
            tally.correct,
            tally.total
        );

        Ok(SessionReport {
            id: session_id,
            created_at: chrono::Utc::now(),
            quiz: QuizSummary {
                name: quiz.name.clone(),
                question_count: quiz.total(),
            },
            results,
            tally,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }
}
