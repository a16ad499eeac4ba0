//! The `quizdrill run` command.

use std::io::BufRead;
use std::path::PathBuf;

use anyhow::Result;

use quizdrill_core::engine::{QuizEngine, QuizEngineConfig};
use quizdrill_core::model::{Question, Quiz, Tally};
use quizdrill_core::parser::{self, MalformedRowPolicy};
use quizdrill_core::report::{AnswerRecord, SessionReport};
use quizdrill_core::traits::{AnswerSource, QuizObserver};

use crate::config::load_config_from;
use crate::style::{ColorMode, Painter};

/// Answer source reading stdin one line at a time.
struct ConsoleSource;

impl AnswerSource for ConsoleSource {
    fn wait_until_ready(&mut self) -> Result<()> {
        // Content is discarded; EOF opens the gate too
        let mut discard = String::new();
        std::io::stdin().lock().read_line(&mut discard)?;
        Ok(())
    }

    fn read_answer(&mut self) -> Result<String> {
        let mut line = String::new();
        let n = std::io::stdin().lock().read_line(&mut line)?;
        if n == 0 {
            return Ok(String::new());
        }
        // Strip exactly one line terminator, nothing else
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(line)
    }
}

/// Console presenter: start banner, question lines, and the red/green tally.
struct ConsoleObserver {
    painter: Painter,
}

impl QuizObserver for ConsoleObserver {
    fn on_quiz_start(&self, _quiz: &Quiz, time_limit_secs: u64) {
        println!("Press enter to start quiz, you have {time_limit_secs} seconds to complete");
    }

    fn on_question(&self, _index: usize, question: &Question) {
        println!("Question: {}", question.prompt);
    }

    fn on_answered(&self, _record: &AnswerRecord) {}

    fn on_quiz_complete(&self, tally: &Tally) {
        println!(
            "{}",
            self.painter
                .red(&format!("Incorrect Questions: {}/{}", tally.incorrect, tally.total))
        );
        println!(
            "{}",
            self.painter
                .green(&format!("Correct Questions: {}/{}", tally.correct, tally.total))
        );
    }
}

pub fn execute(
    quiz_path: Option<PathBuf>,
    on_malformed: Option<MalformedRowPolicy>,
    color: Option<ColorMode>,
    breakdown: bool,
    save: bool,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let quiz_path = quiz_path.unwrap_or(config.quiz);
    let policy = on_malformed.unwrap_or(config.on_malformed);
    let color = color.unwrap_or(config.color);

    // A load failure is fatal before any prompt is printed
    let mut quiz = parser::load_quiz(&quiz_path, policy)?;
    tracing::info!("loaded {} questions from {}", quiz.total(), quiz_path.display());

    let engine = QuizEngine::new(QuizEngineConfig {
        time_limit_secs: config.time_limit_secs,
    });
    let mut source = ConsoleSource;
    let observer = ConsoleObserver {
        painter: Painter::for_stdout(color),
    };

    let report = engine.run(&mut quiz, &mut source, &observer)?;

    if breakdown {
        print_breakdown(&report);
    }

    if save {
        let dir = output.unwrap_or(config.results_dir);
        let timestamp = chrono::Utc::now().format("%Y%m%dT%H%M%S");
        let id = report.id.to_string();
        let path = dir.join(format!("session-{timestamp}-{}.json", &id[..8]));
        report.save_json(&path)?;
        eprintln!("Session saved to: {}", path.display());
    }

    Ok(())
}

fn print_breakdown(report: &SessionReport) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Your Answer", "Expected", "Result"]);

    for r in &report.results {
        table.add_row(vec![
            Cell::new(r.index + 1),
            Cell::new(&r.prompt),
            Cell::new(&r.given),
            Cell::new(&r.expected),
            Cell::new(if r.correct { "correct" } else { "incorrect" }),
        ]);
    }

    println!("\n{table}");
}
