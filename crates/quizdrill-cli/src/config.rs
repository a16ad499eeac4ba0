//! Configuration loading for the quizdrill CLI.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizdrill_core::parser::MalformedRowPolicy;

use crate::style::ColorMode;

/// Top-level quizdrill configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizdrillConfig {
    /// Default quiz file for `quizdrill run`.
    #[serde(default = "default_quiz_path")]
    pub quiz: PathBuf,
    /// Color output mode.
    #[serde(default)]
    pub color: ColorMode,
    /// What to do with rows that have no comma separator.
    #[serde(default)]
    pub on_malformed: MalformedRowPolicy,
    /// Time limit advertised in the start banner; informational only.
    #[serde(default = "default_time_limit")]
    pub time_limit_secs: u64,
    /// Where `run --save` writes session reports.
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
}

fn default_quiz_path() -> PathBuf {
    PathBuf::from("problems.csv")
}
fn default_time_limit() -> u64 {
    30
}
fn default_results_dir() -> PathBuf {
    PathBuf::from("./quizdrill-results")
}

impl Default for QuizdrillConfig {
    fn default() -> Self {
        Self {
            quiz: default_quiz_path(),
            color: ColorMode::default(),
            on_malformed: MalformedRowPolicy::default(),
            time_limit_secs: default_time_limit(),
            results_dir: default_results_dir(),
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order when no path is given:
/// 1. `quizdrill.toml` in the current directory
/// 2. `~/.config/quizdrill/config.toml`
///
/// Environment variable overrides: `QUIZDRILL_QUIZ`, `QUIZDRILL_RESULTS_DIR`.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizdrillConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizdrill.toml");
        if local.exists() {
            Some(local)
        } else if let Some(dir) = dirs_path() {
            let global = dir.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<QuizdrillConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizdrillConfig::default(),
    };

    // Apply env var overrides
    if let Ok(quiz) = std::env::var("QUIZDRILL_QUIZ") {
        config.quiz = PathBuf::from(quiz);
    }
    if let Ok(dir) = std::env::var("QUIZDRILL_RESULTS_DIR") {
        config.results_dir = PathBuf::from(dir);
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizdrill"))
}
