pub mod artifact;
pub mod assess;
pub mod config;
pub mod context;
pub mod gate;
pub mod history;
pub mod init;
pub mod prompt;
pub mod render;
pub mod status;
pub mod transition;

use anyhow::Context;
use insight_core::{
    config::{Config, WarnLevel},
    manager::PhaseManager,
    types::Phase,
};
use std::path::Path;
use std::str::FromStr;

/// Open the project with its config applied. Config errors are logged but
/// do not stop the command; `insight config validate` reports them in full.
pub fn open_manager(root: &Path) -> anyhow::Result<PhaseManager> {
    let config = Config::load(root).context("failed to load config")?;
    for w in config.validate() {
        if w.level == WarnLevel::Error {
            tracing::warn!("config: {}", w.message);
        }
    }
    Ok(PhaseManager::with_config(root, &config))
}

pub fn parse_phase(name: &str) -> anyhow::Result<Phase> {
    Phase::from_str(name).with_context(|| {
        let known: Vec<&str> = Phase::all().iter().map(|p| p.as_str()).collect();
        format!("expected one of: {}", known.join(", "))
    })
}
