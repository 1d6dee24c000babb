use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use std::path::Path;

#[derive(Subcommand)]
pub enum GateSubcommand {
    /// List every gate with its criteria and the transition it guards
    List,
    /// Evaluate a gate against its latest assessment
    Eval {
        /// Gate name (e.g. conceptToRequirements)
        name: String,
    },
}

pub fn run(root: &Path, subcmd: GateSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        GateSubcommand::List => list(root, json),
        GateSubcommand::Eval { name } => eval(root, &name, json),
    }
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let manager = super::open_manager(root)?;
    let catalog = manager.catalog();

    if json {
        let gates: Vec<_> = catalog.gates().collect();
        print_json(&gates)?;
        return Ok(());
    }

    let mut rows = Vec::new();
    for gate in catalog.gates() {
        let guards = catalog
            .transitions()
            .iter()
            .filter(|(_, _, g)| g == &gate.name)
            .map(|(from, to, _)| format!("{from} -> {to}"))
            .collect::<Vec<_>>()
            .join(", ");
        for c in &gate.criteria {
            rows.push(vec![
                gate.name.clone(),
                if guards.is_empty() { "-".to_string() } else { guards.clone() },
                c.name.clone(),
                c.threshold.to_string(),
                c.weight.to_string(),
            ]);
        }
    }
    print_table(&["GATE", "GUARDS", "CRITERION", "THRESHOLD", "WEIGHT"], rows);
    Ok(())
}

fn eval(root: &Path, name: &str, json: bool) -> anyhow::Result<()> {
    let manager = super::open_manager(root)?;
    let evaluation = manager
        .evaluate_gate(name)
        .with_context(|| format!("cannot evaluate gate '{name}'"))?;

    if json {
        print_json(&evaluation)?;
        return Ok(());
    }

    let verdict = if evaluation.passed { "passed" } else { "blocked" };
    println!("{}: {verdict}", evaluation.gate);
    match evaluation.scores.first() {
        Some(a) => println!("  latest score: {} ({})", a.score, a.explanation),
        None => println!("  no assessments recorded"),
    }
    for missing in &evaluation.missing_criteria {
        println!("  missing: {missing}");
    }
    Ok(())
}
