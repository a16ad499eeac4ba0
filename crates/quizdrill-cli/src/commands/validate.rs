//! The `quizdrill validate` command.

use std::path::PathBuf;

use anyhow::Result;

use quizdrill_core::parser::{self, MalformedRowPolicy};

pub fn execute(quiz_path: PathBuf) -> Result<()> {
    let quizzes = if quiz_path.is_dir() {
        parser::load_quiz_directory(&quiz_path, MalformedRowPolicy::Fail)?
    } else {
        vec![parser::load_quiz(&quiz_path, MalformedRowPolicy::Fail)?]
    };

    let mut total_warnings = 0;

    for quiz in &quizzes {
        println!("Quiz: {} ({} questions)", quiz.name, quiz.total());

        let warnings = parser::validate_quiz(quiz);
        for w in &warnings {
            let prefix = w
                .question
                .map(|i| format!("  [question {}]", i + 1))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All quizzes valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
