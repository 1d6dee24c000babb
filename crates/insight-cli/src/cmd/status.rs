use crate::output::print_json;
use insight_core::render;
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let manager = super::open_manager(root)?;
    let evaluations = manager.evaluate_all();

    if json {
        print_json(&serde_json::json!({
            "currentPhase": manager.current_phase(),
            "gates": evaluations,
        }))?;
        return Ok(());
    }

    print!(
        "{}",
        render::status_report(manager.current_phase(), &evaluations)
    );
    Ok(())
}
