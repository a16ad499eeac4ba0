//! The `quizdrill compare` command.

use std::path::PathBuf;

use anyhow::Result;

use quizdrill_core::report::SessionReport;

pub fn execute(
    baseline_path: PathBuf,
    current_path: PathBuf,
    format: String,
    fail_on_lapse: bool,
) -> Result<()> {
    let baseline = SessionReport::load_json(&baseline_path)?;
    let current = SessionReport::load_json(&current_path)?;

    let report = current.compare(&baseline);

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", report.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            // text format
            println!(
                "Comparison: {} lapses, {} gains, {} unchanged",
                report.lapses.len(),
                report.gains.len(),
                report.unchanged
            );
            println!(
                "Accuracy: {:.1}% -> {:.1}%",
                report.baseline_accuracy * 100.0,
                report.current_accuracy * 100.0
            );

            if !report.lapses.is_empty() {
                println!("\nLapses:");
                for d in &report.lapses {
                    println!(
                        "  {}: was {:?}, now {:?}",
                        d.prompt, d.baseline_given, d.current_given
                    );
                }
            }

            if !report.gains.is_empty() {
                println!("\nGains:");
                for d in &report.gains {
                    println!(
                        "  {}: was {:?}, now {:?}",
                        d.prompt, d.baseline_given, d.current_given
                    );
                }
            }

            if report.new_questions > 0 {
                println!("\n{} new question(s)", report.new_questions);
            }
            if report.removed_questions > 0 {
                println!("{} removed question(s)", report.removed_questions);
            }
        }
    }

    if fail_on_lapse && report.has_lapses() {
        std::process::exit(1);
    }

    Ok(())
}
