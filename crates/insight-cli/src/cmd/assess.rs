use crate::output::{print_json, print_table, summary};
use anyhow::Context;
use clap::Subcommand;
use insight_core::assessment::Assessment;
use std::path::Path;

#[derive(Subcommand)]
pub enum AssessSubcommand {
    /// Record an assessment against a gate
    Add {
        /// Gate name (e.g. conceptToRequirements)
        gate: String,
        /// Score on a 0-10 scale
        #[arg(long)]
        score: f64,
        /// Why the score was given
        #[arg(long)]
        explanation: String,
        /// Suggested improvement (repeatable)
        #[arg(long = "recommendation")]
        recommendations: Vec<String>,
        /// Limit the assessment to one criterion of the gate
        #[arg(long)]
        criterion: Option<String>,
    },
    /// List every assessment recorded for a gate, oldest first
    Show {
        gate: String,
    },
}

pub fn run(root: &Path, subcmd: AssessSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        AssessSubcommand::Add {
            gate,
            score,
            explanation,
            recommendations,
            criterion,
        } => {
            let mut assessment =
                Assessment::new(score, explanation).with_recommendations(recommendations);
            if let Some(c) = criterion {
                assessment = assessment.for_criterion(c);
            }
            add(root, &gate, assessment, json)
        }
        AssessSubcommand::Show { gate } => show(root, &gate, json),
    }
}

fn add(root: &Path, gate: &str, assessment: Assessment, json: bool) -> anyhow::Result<()> {
    let mut manager = super::open_manager(root)?;
    if manager.catalog().gate(gate).is_none() {
        tracing::warn!(gate, "recording an assessment for a gate the catalog does not define");
    }
    manager
        .add_assessment(gate, assessment.clone())
        .with_context(|| format!("failed to record assessment for '{gate}'"))?;

    if json {
        print_json(&serde_json::json!({
            "gate": gate,
            "assessment": assessment,
        }))?;
    } else {
        println!("Recorded score {} for {gate}", assessment.score);
    }
    Ok(())
}

fn show(root: &Path, gate: &str, json: bool) -> anyhow::Result<()> {
    let manager = super::open_manager(root)?;
    let history = manager.store().assessments(gate);

    if json {
        print_json(&history)?;
        return Ok(());
    }

    if history.is_empty() {
        println!("No assessments recorded for {gate}.");
        return Ok(());
    }
    let rows = history
        .iter()
        .enumerate()
        .map(|(i, a)| {
            vec![
                (i + 1).to_string(),
                a.score.to_string(),
                a.criterion_name.clone().unwrap_or_else(|| "-".to_string()),
                summary(&a.explanation, 60),
            ]
        })
        .collect();
    print_table(&["#", "SCORE", "CRITERION", "EXPLANATION"], rows);
    Ok(())
}
