use anyhow::Context;
use insight_core::{config::Config, manager::PhaseManager, paths};
use std::path::Path;

pub fn run(root: &Path) -> anyhow::Result<()> {
    let project_name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "project".to_string());

    println!("Initializing insight in: {}", root.display());

    let dir = paths::insight_dir(root);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;

    if !paths::config_path(root).exists() {
        Config::new(&project_name)
            .save(root)
            .context("failed to write config.yaml")?;
        println!("  created: {}", paths::CONFIG_FILE);
    } else {
        println!("  exists:  {}", paths::CONFIG_FILE);
    }

    let config = Config::load(root).context("failed to load config")?;
    let state_path = config.state_path(root);
    let rel = state_path
        .strip_prefix(root)
        .unwrap_or(&state_path)
        .display()
        .to_string();
    let manager = PhaseManager::with_config(root, &config);
    if !state_path.exists() {
        manager
            .store()
            .flush()
            .context("failed to write initial state")?;
        println!("  created: {rel}");
    } else {
        println!("  exists:  {rel}");
    }

    println!(
        "\ninsight initialized. Current phase: {}",
        manager.current_phase()
    );
    Ok(())
}
