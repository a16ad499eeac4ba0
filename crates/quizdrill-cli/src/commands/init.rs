//! The `quizdrill init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create quizdrill.toml
    if std::path::Path::new("quizdrill.toml").exists() {
        println!("quizdrill.toml already exists, skipping.");
    } else {
        std::fs::write("quizdrill.toml", SAMPLE_CONFIG)?;
        println!("Created quizdrill.toml");
    }

    // Create example quiz
    std::fs::create_dir_all("quizzes")?;
    let example_path = std::path::Path::new("quizzes/example.csv");
    if example_path.exists() {
        println!("quizzes/example.csv already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_QUIZ)?;
        println!("Created quizzes/example.csv");
    }

    println!("\nNext steps:");
    println!("  1. Edit quizzes/example.csv with your own questions");
    println!("  2. Run: quizdrill validate --quiz quizzes/example.csv");
    println!("  3. Run: quizdrill run --quiz quizzes/example.csv");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizdrill configuration

# Default quiz file for `quizdrill run`
quiz = "problems.csv"

# Color output: auto, always, never
color = "auto"

# Malformed-row policy: fail, skip, empty-answer
on_malformed = "fail"

# Time limit advertised in the start banner (informational only)
time_limit_secs = 30

# Where `run --save` writes session reports
results_dir = "./quizdrill-results"
"#;

const EXAMPLE_QUIZ: &str = "2+2,4
capital of France,Paris
largest planet,Jupiter
7*6,42
";
