//! Session report types with JSON persistence and progress comparison.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::Tally;

/// One graded question within a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRecord {
    /// 0-based position in the quiz.
    pub index: usize,
    /// The question text.
    pub prompt: String,
    /// The expected answer.
    pub expected: String,
    /// What the user entered, terminator stripped.
    pub given: String,
    /// Whether `given` matched `expected` exactly.
    pub correct: bool,
}

/// Summary of the quiz a session was run against (without the questions).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSummary {
    pub name: String,
    pub question_count: usize,
}

/// A complete record of one quiz session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// Unique session identifier.
    pub id: Uuid,
    /// When the session started.
    pub created_at: DateTime<Utc>,
    /// The quiz that was administered.
    pub quiz: QuizSummary,
    /// Per-question outcomes in quiz order.
    pub results: Vec<AnswerRecord>,
    /// Final counters.
    pub tally: Tally,
    /// Wall-clock duration of the session in milliseconds.
    pub duration_ms: u64,
}

impl SessionReport {
    /// Save the report as JSON to a file, creating parent directories.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: SessionReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Compare this session against a baseline to see how answers moved.
    ///
    /// Questions are matched by prompt. A prompt asked more than once in a
    /// session counts as correct if any of its attempts was correct.
    pub fn compare(&self, baseline: &SessionReport) -> ComparisonReport {
        let outcome_map = |report: &SessionReport| -> HashMap<String, Outcome> {
            let mut map: HashMap<String, Outcome> = HashMap::new();
            for r in &report.results {
                let entry = map.entry(r.prompt.clone()).or_insert(Outcome {
                    correct: false,
                    given: r.given.clone(),
                });
                if r.correct {
                    entry.correct = true;
                }
                entry.given = r.given.clone();
            }
            map
        };

        let baseline_outcomes = outcome_map(baseline);
        let current_outcomes = outcome_map(self);

        let mut lapses = Vec::new();
        let mut gains = Vec::new();
        let mut unchanged = 0usize;
        let mut new_questions = 0usize;

        for (prompt, current) in &current_outcomes {
            if let Some(base) = baseline_outcomes.get(prompt) {
                match (base.correct, current.correct) {
                    (true, false) => lapses.push(QuestionDelta {
                        prompt: prompt.clone(),
                        baseline_given: base.given.clone(),
                        current_given: current.given.clone(),
                    }),
                    (false, true) => gains.push(QuestionDelta {
                        prompt: prompt.clone(),
                        baseline_given: base.given.clone(),
                        current_given: current.given.clone(),
                    }),
                    _ => unchanged += 1,
                }
            } else {
                new_questions += 1;
            }
        }

        let removed_questions = baseline_outcomes
            .keys()
            .filter(|p| !current_outcomes.contains_key(*p))
            .count();

        lapses.sort_by(|a, b| a.prompt.cmp(&b.prompt));
        gains.sort_by(|a, b| a.prompt.cmp(&b.prompt));

        ComparisonReport {
            baseline_accuracy: baseline.tally.accuracy(),
            current_accuracy: self.tally.accuracy(),
            lapses,
            gains,
            unchanged,
            new_questions,
            removed_questions,
        }
    }
}

struct Outcome {
    correct: bool,
    given: String,
}

/// Result of comparing two session reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// Accuracy of the baseline session.
    pub baseline_accuracy: f64,
    /// Accuracy of the current session.
    pub current_accuracy: f64,
    /// Questions that were correct in the baseline but missed now.
    pub lapses: Vec<QuestionDelta>,
    /// Questions that were missed in the baseline but correct now.
    pub gains: Vec<QuestionDelta>,
    /// Questions whose outcome did not change.
    pub unchanged: usize,
    /// Prompts present now but not in the baseline.
    pub new_questions: usize,
    /// Prompts present in the baseline but not now.
    pub removed_questions: usize,
}

/// One question whose outcome changed between sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionDelta {
    pub prompt: String,
    pub baseline_given: String,
    pub current_given: String,
}

impl ComparisonReport {
    /// Returns true if any previously-correct answer was missed.
    pub fn has_lapses(&self) -> bool {
        !self.lapses.is_empty()
    }

    /// Format the comparison as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Summary:** accuracy {:.1}% -> {:.1}%, {} lapses, {} gains, {} unchanged\n\n",
            self.baseline_accuracy * 100.0,
            self.current_accuracy * 100.0,
            self.lapses.len(),
            self.gains.len(),
            self.unchanged
        ));

        if !self.lapses.is_empty() {
            md.push_str("### Lapses\n\n");
            md.push_str("| Question | Was | Now |\n");
            md.push_str("|----------|-----|-----|\n");
            for d in &self.lapses {
                md.push_str(&format!(
                    "| {} | {} | {} |\n",
                    d.prompt, d.baseline_given, d.current_given
                ));
            }
            md.push('\n');
        }

        if !self.gains.is_empty() {
            md.push_str("### Gains\n\n");
            md.push_str("| Question | Was | Now |\n");
            md.push_str("|----------|-----|-----|\n");
            for d in &self.gains {
                md.push_str(&format!(
                    "| {} | {} | {} |\n",
                    d.prompt, d.baseline_given, d.current_given
                ));
            }
        }

        md
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(index: usize, prompt: &str, expected: &str, given: &str) -> AnswerRecord {
        AnswerRecord {
            index,
            prompt: prompt.into(),
            expected: expected.into(),
            given: given.into(),
            correct: expected == given,
        }
    }

    fn report(results: Vec<AnswerRecord>) -> SessionReport {
        let correct = results.iter().filter(|r| r.correct).count() as u32;
        let total = results.len() as u32;
        SessionReport {
            id: Uuid::nil(),
            created_at: Utc::now(),
            quiz: QuizSummary {
                name: "test".into(),
                question_count: results.len(),
            },
            tally: Tally {
                correct,
                incorrect: total - correct,
                total,
            },
            results,
            duration_ms: 0,
        }
    }

    #[test]
    fn compare_identical_sessions() {
        let baseline = report(vec![record(0, "2+2", "4", "4")]);
        let current = report(vec![record(0, "2+2", "4", "4")]);

        let cmp = current.compare(&baseline);
        assert!(cmp.lapses.is_empty());
        assert!(cmp.gains.is_empty());
        assert_eq!(cmp.unchanged, 1);
        assert!(!cmp.has_lapses());
    }

    #[test]
    fn compare_detects_lapse_and_gain() {
        let baseline = report(vec![
            record(0, "2+2", "4", "4"),
            record(1, "capital of France", "Paris", "paris"),
        ]);
        let current = report(vec![
            record(0, "2+2", "4", "5"),
            record(1, "capital of France", "Paris", "Paris"),
        ]);

        let cmp = current.compare(&baseline);
        assert_eq!(cmp.lapses.len(), 1);
        assert_eq!(cmp.lapses[0].prompt, "2+2");
        assert_eq!(cmp.lapses[0].current_given, "5");
        assert_eq!(cmp.gains.len(), 1);
        assert_eq!(cmp.gains[0].prompt, "capital of France");
        assert!(cmp.has_lapses());
    }

    #[test]
    fn compare_counts_new_and_removed_prompts() {
        let baseline = report(vec![record(0, "old question", "x", "x")]);
        let current = report(vec![record(0, "new question", "y", "y")]);

        let cmp = current.compare(&baseline);
        assert_eq!(cmp.new_questions, 1);
        assert_eq!(cmp.removed_questions, 1);
        assert_eq!(cmp.unchanged, 0);
    }

    #[test]
    fn compare_accuracy_delta() {
        let baseline = report(vec![
            record(0, "a", "1", "9"),
            record(1, "b", "2", "9"),
        ]);
        let current = report(vec![
            record(0, "a", "1", "1"),
            record(1, "b", "2", "2"),
        ]);

        let cmp = current.compare(&baseline);
        assert_eq!(cmp.baseline_accuracy, 0.0);
        assert_eq!(cmp.current_accuracy, 1.0);
    }

    #[test]
    fn json_roundtrip() {
        let report = report(vec![record(0, "2+2", "4", "4")]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        report.save_json(&path).unwrap();
        let loaded = SessionReport::load_json(&path).unwrap();

        assert_eq!(loaded.quiz.name, "test");
        assert_eq!(loaded.results.len(), 1);
        assert_eq!(loaded.tally.correct, 1);
    }

    #[test]
    fn load_missing_report_fails() {
        assert!(SessionReport::load_json(Path::new("no/such/report.json")).is_err());
    }

    #[test]
    fn markdown_output() {
        let baseline = report(vec![record(0, "2+2", "4", "4")]);
        let current = report(vec![record(0, "2+2", "4", "5")]);

        let md = current.compare(&baseline).to_markdown();
        assert!(md.contains("Lapses"));
        assert!(md.contains("2+2"));
    }
}
