use crate::output::print_json;
use anyhow::Context;
use std::path::Path;

pub fn run(root: &Path, from: &str, to: &str, json: bool) -> anyhow::Result<()> {
    let from_phase = super::parse_phase(from)?;
    let to_phase = super::parse_phase(to)?;

    let mut manager = super::open_manager(root)?;
    let outcome = manager
        .attempt_transition(from_phase, to_phase)
        .with_context(|| format!("transition {from} -> {to} failed"))?;

    if json {
        print_json(&outcome)?;
        return Ok(());
    }

    println!("{}", outcome.message);
    if let Some(required) = &outcome.required_assessments {
        for name in required {
            println!("  needs: {name}");
        }
    }
    Ok(())
}
