use crate::output::print_json;
use anyhow::Context;
use clap::Subcommand;
use insight_core::context::PhaseContext;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Subcommand)]
pub enum ContextSubcommand {
    /// Print the stored context record for a phase
    Get { phase: String },
    /// Replace a phase's context record from a YAML or JSON document
    Set {
        phase: String,
        /// Document to read, or `-` for stdin
        #[arg(long)]
        file: PathBuf,
    },
    /// Append a key decision to the concept context
    Decide {
        #[arg(long)]
        decision: String,
        #[arg(long)]
        rationale: String,
        /// Decision date, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
    },
}

pub fn run(root: &Path, subcmd: ContextSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ContextSubcommand::Get { phase } => get(root, &phase, json),
        ContextSubcommand::Set { phase, file } => set(root, &phase, &file, json),
        ContextSubcommand::Decide {
            decision,
            rationale,
            date,
        } => decide(root, &decision, &rationale, date, json),
    }
}

fn get(root: &Path, phase: &str, json: bool) -> anyhow::Result<()> {
    let phase = super::parse_phase(phase)?;
    let manager = super::open_manager(root)?;
    let Some(ctx) = manager.context(phase) else {
        if json {
            print_json(&serde_json::Value::Null)?;
        } else {
            println!("No context recorded for {phase}.");
        }
        return Ok(());
    };

    if json {
        print_json(&ctx)?;
    } else {
        let yaml = serde_yaml::to_string(&ctx).context("failed to render context")?;
        print!("{yaml}");
    }
    Ok(())
}

fn read_document(file: &Path) -> anyhow::Result<String> {
    if file == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))
}

fn set(root: &Path, phase_name: &str, file: &Path, json: bool) -> anyhow::Result<()> {
    let phase = super::parse_phase(phase_name)?;
    let text = read_document(file)?;
    let ctx = PhaseContext::parse(phase, &text).with_context(|| {
        format!(
            "document is not a valid {} context record",
            PhaseContext::kind_for(phase)
        )
    })?;

    let mut manager = super::open_manager(root)?;
    manager
        .update_context(phase, ctx)
        .with_context(|| format!("failed to update context for {phase}"))?;

    if json {
        print_json(&serde_json::json!({ "phase": phase, "updated": true }))?;
    } else {
        println!("Updated {phase} context");
    }
    Ok(())
}

fn decide(
    root: &Path,
    decision: &str,
    rationale: &str,
    date: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let date = match date {
        Some(d) => {
            chrono::NaiveDate::parse_from_str(&d, "%Y-%m-%d")
                .with_context(|| format!("invalid date '{d}', expected YYYY-MM-DD"))?;
            d
        }
        None => chrono::Local::now().format("%Y-%m-%d").to_string(),
    };

    let mut manager = super::open_manager(root)?;
    manager
        .record_decision(&date, decision, rationale)
        .context("failed to record decision")?;

    if json {
        print_json(&serde_json::json!({
            "date": date,
            "decision": decision,
            "rationale": rationale,
        }))?;
    } else {
        println!("Recorded decision ({date}): {decision}");
    }
    Ok(())
}
