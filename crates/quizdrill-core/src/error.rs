//! Loader error types.
//!
//! These errors represent failures while turning a quiz file into a [`Quiz`].
//! Open, read, and malformed-row failures are distinct variants so the CLI
//! can report them precisely without string matching.
//!
//! [`Quiz`]: crate::model::Quiz

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a quiz file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened (missing, permission denied, ...).
    #[error("failed to open quiz file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line could not be read (truncated device, invalid UTF-8, ...).
    #[error("failed to read quiz file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A row had no comma separator under the `fail` policy.
    #[error("{path}:{line}: row has no comma separator: {content:?}")]
    MalformedRow {
        path: PathBuf,
        /// 1-based line number in the source file.
        line: usize,
        content: String,
    },
}

impl LoadError {
    /// Returns `true` if this error concerns the file's content rather than
    /// the filesystem.
    pub fn is_malformed(&self) -> bool {
        matches!(self, LoadError::MalformedRow { .. })
    }

    /// The offending 1-based line number, if applicable.
    pub fn line(&self) -> Option<usize> {
        match self {
            LoadError::MalformedRow { line, .. } => Some(*line),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_row_classification() {
        let err = LoadError::MalformedRow {
            path: PathBuf::from("problems.csv"),
            line: 3,
            content: "no separator here".into(),
        };
        assert!(err.is_malformed());
        assert_eq!(err.line(), Some(3));
        let msg = err.to_string();
        assert!(msg.contains("problems.csv:3"));
        assert!(msg.contains("no separator here"));
    }

    #[test]
    fn open_error_is_not_malformed() {
        let err = LoadError::Open {
            path: PathBuf::from("missing.csv"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(!err.is_malformed());
        assert_eq!(err.line(), None);
    }
}
