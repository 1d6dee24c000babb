use crate::output::{print_json, summary};
use std::path::Path;

pub fn run(root: &Path, phase: &str, json: bool) -> anyhow::Result<()> {
    let phase = super::parse_phase(phase)?;
    let manager = super::open_manager(root)?;
    let history = manager.phase_history(phase);

    if json {
        print_json(&history)?;
        return Ok(());
    }

    println!("Phase: {phase}");
    println!("\nArtifacts:");
    if history.artifacts.is_empty() {
        println!("  (none)");
    }
    for path in &history.artifacts {
        println!("  {path}");
    }

    println!("\nAssessments:");
    if history.assessments.is_empty() {
        println!("  (none)");
    }
    for entry in &history.assessments {
        println!(
            "  {}: {} - {}",
            entry.gate,
            entry.assessment.score,
            summary(&entry.assessment.explanation, 60)
        );
    }
    Ok(())
}
