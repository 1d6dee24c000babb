use crate::types::Phase;
use std::path::{Path, PathBuf};
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const INSIGHT_DIR: &str = ".insight";
pub const CONFIG_FILE: &str = ".insight/config.yaml";
pub const STATE_FILE: &str = ".insight/state.yaml";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn insight_dir(root: &Path) -> PathBuf {
    root.join(INSIGHT_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn state_path(root: &Path) -> PathBuf {
    root.join(STATE_FILE)
}

// ---------------------------------------------------------------------------
// Artifact scoping
// ---------------------------------------------------------------------------

/// The phase an artifact key is scoped to, by convention the first path
/// segment (`concept/brief.md` belongs to `concept`).
pub fn artifact_phase(artifact: &str) -> Option<Phase> {
    let (first, _) = artifact.split_once('/')?;
    Phase::from_str(first).ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
