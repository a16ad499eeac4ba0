//! CSV quiz loader.
//!
//! Loads quizzes from comma-separated files and directories, and validates
//! them. One record per line, two fields split on the first comma: prompt,
//! then answer. No quoting or escaping; fields are taken verbatim apart from
//! line-terminator stripping, and empty lines are skipped.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::model::{Question, Quiz};

/// What to do with a row that has no comma separator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MalformedRowPolicy {
    /// Reject the whole file; no partial quiz is returned.
    #[default]
    Fail,
    /// Drop the row and keep loading.
    Skip,
    /// Keep the row: the whole line becomes the prompt, the answer is empty.
    EmptyAnswer,
}

impl fmt::Display for MalformedRowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedRowPolicy::Fail => write!(f, "fail"),
            MalformedRowPolicy::Skip => write!(f, "skip"),
            MalformedRowPolicy::EmptyAnswer => write!(f, "empty-answer"),
        }
    }
}

impl FromStr for MalformedRowPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fail" | "strict" => Ok(MalformedRowPolicy::Fail),
            "skip" | "lenient" => Ok(MalformedRowPolicy::Skip),
            "empty-answer" | "empty" => Ok(MalformedRowPolicy::EmptyAnswer),
            other => Err(format!("unknown malformed-row policy: {other}")),
        }
    }
}

/// Load a quiz from a file.
///
/// Open and read failures are distinct [`LoadError`] variants; malformed rows
/// are handled according to `policy`. The returned quiz preserves file order
/// and has zeroed counters.
pub fn load_quiz(path: &Path, policy: MalformedRowPolicy) -> Result<Quiz, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut questions = Vec::new();
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        push_row(&mut questions, &line, idx + 1, path, policy)?;
    }

    Ok(Quiz::new(quiz_name(path), questions))
}

/// Parse a quiz from an in-memory string (useful for testing).
///
/// `source` is used for the quiz name and for positions in error messages.
pub fn parse_quiz_str(
    content: &str,
    source: &Path,
    policy: MalformedRowPolicy,
) -> Result<Quiz, LoadError> {
    let mut questions = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        push_row(&mut questions, line, idx + 1, source, policy)?;
    }
    Ok(Quiz::new(quiz_name(source), questions))
}

/// Parse one row into `questions` according to the malformed-row policy.
fn push_row(
    questions: &mut Vec<Question>,
    line: &str,
    line_no: usize,
    path: &Path,
    policy: MalformedRowPolicy,
) -> Result<(), LoadError> {
    if line.is_empty() {
        return Ok(());
    }

    match line.split_once(',') {
        Some((prompt, answer)) => {
            questions.push(Question::new(prompt, answer));
        }
        None => match policy {
            MalformedRowPolicy::Fail => {
                return Err(LoadError::MalformedRow {
                    path: path.to_path_buf(),
                    line: line_no,
                    content: line.to_string(),
                });
            }
            MalformedRowPolicy::Skip => {
                tracing::warn!("{}:{}: skipping row with no comma separator", path.display(), line_no);
            }
            MalformedRowPolicy::EmptyAnswer => {
                questions.push(Question::new(line, ""));
            }
        },
    }

    Ok(())
}

fn quiz_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Recursively load all `.csv` quiz files from a directory.
///
/// Files that fail to load are skipped with a warning.
pub fn load_quiz_directory(dir: &Path, policy: MalformedRowPolicy) -> Result<Vec<Quiz>> {
    let mut quizzes = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            quizzes.extend(load_quiz_directory(&path, policy)?);
        } else if path.extension().is_some_and(|ext| ext == "csv") {
            match load_quiz(&path, policy) {
                Ok(quiz) => quizzes.push(quiz),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(quizzes)
}

/// A warning from quiz validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// 0-based index of the question (if applicable).
    pub question: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Validate a quiz for common authoring issues.
///
/// These are soft problems a well-formed file can still have; malformed rows
/// are the loader's concern.
pub fn validate_quiz(quiz: &Quiz) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Check for duplicate prompts
    let mut seen = std::collections::HashSet::new();
    for (i, q) in quiz.questions.iter().enumerate() {
        if !seen.insert(q.prompt.as_str()) {
            warnings.push(ValidationWarning {
                question: Some(i),
                message: format!("duplicate prompt: {:?}", q.prompt),
            });
        }
    }

    for (i, q) in quiz.questions.iter().enumerate() {
        if q.prompt.is_empty() {
            warnings.push(ValidationWarning {
                question: Some(i),
                message: "prompt is empty".into(),
            });
        }
        if q.answer.is_empty() {
            warnings.push(ValidationWarning {
                question: Some(i),
                message: "answer is empty; only an empty input will score correct".into(),
            });
        } else if q.answer.trim() != q.answer {
            warnings.push(ValidationWarning {
                question: Some(i),
                message: format!(
                    "answer {:?} has surrounding whitespace; comparisons are exact",
                    q.answer
                ),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    const VALID_CSV: &str = "2+2,4\ncapital of France,Paris\n";

    fn src() -> PathBuf {
        PathBuf::from("test.csv")
    }

    #[test]
    fn parse_valid_rows() {
        let quiz = parse_quiz_str(VALID_CSV, &src(), MalformedRowPolicy::Fail).unwrap();
        assert_eq!(quiz.name, "test");
        assert_eq!(quiz.total(), 2);
        assert_eq!(quiz.questions[0], Question::new("2+2", "4"));
        assert_eq!(quiz.questions[1], Question::new("capital of France", "Paris"));
        assert_eq!(quiz.correct(), 0);
        assert_eq!(quiz.incorrect(), 0);
    }

    #[test]
    fn split_on_first_comma_only() {
        let quiz = parse_quiz_str("a,b,c\n", &src(), MalformedRowPolicy::Fail).unwrap();
        assert_eq!(quiz.questions[0], Question::new("a", "b,c"));
    }

    #[test]
    fn fields_are_verbatim() {
        let quiz = parse_quiz_str("  2+2 , 4 \n", &src(), MalformedRowPolicy::Fail).unwrap();
        assert_eq!(quiz.questions[0], Question::new("  2+2 ", " 4 "));
    }

    #[test]
    fn empty_answer_field_is_kept() {
        let quiz = parse_quiz_str("prompt,\n", &src(), MalformedRowPolicy::Fail).unwrap();
        assert_eq!(quiz.questions[0], Question::new("prompt", ""));
    }

    #[test]
    fn empty_file_loads_empty_quiz() {
        let quiz = parse_quiz_str("", &src(), MalformedRowPolicy::Fail).unwrap();
        assert_eq!(quiz.total(), 0);
    }

    #[test]
    fn empty_lines_are_skipped() {
        let quiz = parse_quiz_str("a,1\n\nb,2\n\n", &src(), MalformedRowPolicy::Fail).unwrap();
        assert_eq!(quiz.total(), 2);
    }

    #[test]
    fn malformed_row_fails_whole_load() {
        let err = parse_quiz_str("a,1\nno separator\nb,2\n", &src(), MalformedRowPolicy::Fail)
            .unwrap_err();
        assert!(err.is_malformed());
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn malformed_row_skip_policy() {
        let quiz = parse_quiz_str("a,1\nno separator\nb,2\n", &src(), MalformedRowPolicy::Skip)
            .unwrap();
        assert_eq!(quiz.total(), 2);
        assert_eq!(quiz.questions[1], Question::new("b", "2"));
    }

    #[test]
    fn malformed_row_empty_answer_policy() {
        let quiz = parse_quiz_str(
            "no separator\n",
            &src(),
            MalformedRowPolicy::EmptyAnswer,
        )
        .unwrap();
        assert_eq!(quiz.questions[0], Question::new("no separator", ""));
    }

    #[test]
    fn policy_parse_and_display() {
        assert_eq!(
            "fail".parse::<MalformedRowPolicy>().unwrap(),
            MalformedRowPolicy::Fail
        );
        assert_eq!(
            "lenient".parse::<MalformedRowPolicy>().unwrap(),
            MalformedRowPolicy::Skip
        );
        assert_eq!(
            "empty-answer".parse::<MalformedRowPolicy>().unwrap(),
            MalformedRowPolicy::EmptyAnswer
        );
        assert_eq!(MalformedRowPolicy::Skip.to_string(), "skip");
        assert!("shuffle".parse::<MalformedRowPolicy>().is_err());
    }

    #[test]
    fn load_missing_file_is_open_error() {
        let err = load_quiz(Path::new("definitely/missing.csv"), MalformedRowPolicy::Fail)
            .unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
    }

    #[test]
    fn load_invalid_utf8_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.csv");
        let mut f = File::create(&path).unwrap();
        f.write_all(b"ok,line\n\xff\xfe broken\n").unwrap();
        drop(f);

        let err = load_quiz(&path, MalformedRowPolicy::Fail).unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));
    }

    #[test]
    fn load_file_strips_crlf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crlf.csv");
        std::fs::write(&path, "2+2,4\r\ncapital of France,Paris\r\n").unwrap();

        let quiz = load_quiz(&path, MalformedRowPolicy::Fail).unwrap();
        assert_eq!(quiz.questions[0].answer, "4");
        assert_eq!(quiz.questions[1].answer, "Paris");
    }

    #[test]
    fn load_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("one.csv"), VALID_CSV).unwrap();
        let nested = dir.path().join("nested");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(nested.join("two.csv"), "x,y\n").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let mut quizzes =
            load_quiz_directory(dir.path(), MalformedRowPolicy::Fail).unwrap();
        quizzes.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(quizzes.len(), 2);
        assert_eq!(quizzes[0].name, "one");
        assert_eq!(quizzes[1].name, "two");
    }

    #[test]
    fn load_directory_rejects_file_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("one.csv");
        std::fs::write(&path, VALID_CSV).unwrap();
        assert!(load_quiz_directory(&path, MalformedRowPolicy::Fail).is_err());
    }

    #[test]
    fn validate_flags_duplicates() {
        let quiz = parse_quiz_str("a,1\na,2\n", &src(), MalformedRowPolicy::Fail).unwrap();
        let warnings = validate_quiz(&quiz);
        assert!(warnings.iter().any(|w| w.message.contains("duplicate")));
    }

    #[test]
    fn validate_flags_empty_fields_and_whitespace() {
        let quiz = parse_quiz_str(",x\nb,\nc, padded \n", &src(), MalformedRowPolicy::Fail)
            .unwrap();
        let warnings = validate_quiz(&quiz);
        assert!(warnings.iter().any(|w| w.message.contains("prompt is empty")));
        assert!(warnings.iter().any(|w| w.message.contains("answer is empty")));
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("surrounding whitespace")));
    }

    #[test]
    fn validate_clean_quiz_has_no_warnings() {
        let quiz = parse_quiz_str(VALID_CSV, &src(), MalformedRowPolicy::Fail).unwrap();
        assert!(validate_quiz(&quiz).is_empty());
    }
}
