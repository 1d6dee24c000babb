use crate::output::{print_json, print_table, summary};
use anyhow::Context;
use clap::Subcommand;
use std::path::Path;

#[derive(Subcommand)]
pub enum PromptSubcommand {
    /// Print the prompt text for a phase and prompt type
    Show {
        /// Phase name (e.g. concept)
        phase: String,
        /// Prompt type (e.g. refinement, assessment)
        #[arg(value_name = "TYPE")]
        kind: String,
    },
    /// List available prompts, optionally for one phase
    List { phase: Option<String> },
}

pub fn run(root: &Path, subcmd: PromptSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        PromptSubcommand::Show { phase, kind } => show(root, &phase, &kind, json),
        PromptSubcommand::List { phase } => list(root, phase.as_deref(), json),
    }
}

fn show(root: &Path, phase: &str, kind: &str, json: bool) -> anyhow::Result<()> {
    let phase = super::parse_phase(phase)?;
    let manager = super::open_manager(root)?;
    let content = manager
        .prompt_for_phase(phase, kind)
        .with_context(|| format!("no '{kind}' prompt for phase {phase}"))?;

    if json {
        print_json(&serde_json::json!({
            "phase": phase,
            "type": kind,
            "content": content,
        }))?;
    } else {
        println!("{content}");
    }
    Ok(())
}

fn list(root: &Path, phase: Option<&str>, json: bool) -> anyhow::Result<()> {
    let phase = phase.map(super::parse_phase).transpose()?;
    let manager = super::open_manager(root)?;
    let catalog = manager.catalog();
    let prompts: Vec<_> = match phase {
        Some(ph) => catalog.prompts_for(ph).collect(),
        None => catalog.prompts().iter().collect(),
    };

    if json {
        print_json(&prompts)?;
        return Ok(());
    }

    let rows = prompts
        .iter()
        .map(|p| {
            vec![
                p.phase.to_string(),
                p.kind.clone(),
                summary(&p.content, 60),
            ]
        })
        .collect();
    print_table(&["PHASE", "TYPE", "PROMPT"], rows);
    Ok(())
}
