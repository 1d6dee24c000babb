use crate::assessment::Assessment;
use crate::catalog::Catalog;
use crate::context::{ContextMap, PhaseContext};
use crate::error::{InsightError, Result};
use crate::paths;
use crate::types::Phase;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// ProcessState
// ---------------------------------------------------------------------------

/// The persisted root document. Absent or `null` keys load as "never set".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProcessState {
    #[serde(deserialize_with = "nullable")]
    pub current_phase: Phase,
    #[serde(deserialize_with = "nullable")]
    pub artifacts: BTreeMap<String, String>,
    #[serde(deserialize_with = "nullable")]
    pub gate_scores: BTreeMap<String, Vec<Assessment>>,
    #[serde(deserialize_with = "nullable")]
    pub context: ContextMap,
}

fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// PhaseHistory
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GateAssessment {
    pub gate: String,
    pub assessment: Assessment,
}

/// Read-only projection of what has been recorded for one phase.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PhaseHistory {
    /// Artifact keys scoped to the phase, in key order.
    pub artifacts: Vec<String>,
    /// Latest assessment of each gate that guards an exit from the phase.
    pub assessments: Vec<GateAssessment>,
}

// ---------------------------------------------------------------------------
// StateStore
// ---------------------------------------------------------------------------

/// Owns the process state and its on-disk document.
///
/// Every mutation updates memory first and then flushes the whole document.
/// A failed flush is returned to the caller; memory keeps the mutation.
#[derive(Debug)]
pub struct StateStore {
    path: PathBuf,
    state: ProcessState,
}

impl StateStore {
    /// Open the store backed by `path`, falling back to the default state
    /// when the file is missing or unusable.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let state = Self::load(&path);
        Self { path, state }
    }

    /// Open the store at the conventional location under `root`.
    pub fn open_in(root: &Path) -> Self {
        Self::open(paths::state_path(root))
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Read the persisted state. Never fails: problems are logged and the
    /// default state is returned instead.
    pub fn load(path: &Path) -> ProcessState {
        match Self::read(path) {
            Ok(Some(state)) => state,
            Ok(None) => {
                tracing::debug!(path = %path.display(), "no persisted state, starting fresh");
                ProcessState::default()
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to load state, starting from defaults"
                );
                ProcessState::default()
            }
        }
    }

    fn read(path: &Path) -> Result<Option<ProcessState>> {
        if !path.exists() {
            return Ok(None);
        }
        let data = std::fs::read_to_string(path)?;
        if data.trim().is_empty() {
            return Ok(None);
        }
        let state: ProcessState = serde_yaml::from_str(&data)?;
        Ok(Some(state))
    }

    /// Serialize the full state and atomically replace the persisted file.
    pub fn flush(&self) -> Result<()> {
        let data = serde_yaml::to_string(&self.state)?;
        crate::io::atomic_write(&self.path, data.as_bytes()).map_err(|source| {
            InsightError::Persist {
                path: self.path.clone(),
                source,
            }
        })?;
        tracing::debug!(path = %self.path.display(), "state flushed");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> &ProcessState {
        &self.state
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    pub fn current_phase(&self) -> Phase {
        self.state.current_phase
    }

    pub fn artifact(&self, path: &str) -> Option<&str> {
        self.state.artifacts.get(path).map(String::as_str)
    }

    pub fn artifact_paths(&self) -> impl Iterator<Item = &str> {
        self.state.artifacts.keys().map(String::as_str)
    }

    /// Full history for a gate in submission order.
    pub fn assessments(&self, gate: &str) -> &[Assessment] {
        self.state
            .gate_scores
            .get(gate)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn latest_assessment(&self, gate: &str) -> Option<&Assessment> {
        self.assessments(gate).last()
    }

    pub fn context(&self, phase: Phase) -> Option<PhaseContext> {
        self.state.context.get(phase)
    }

    pub fn phase_history(&self, phase: Phase, catalog: &Catalog) -> PhaseHistory {
        let artifacts = self
            .state
            .artifacts
            .keys()
            .filter(|p| paths::artifact_phase(p) == Some(phase))
            .cloned()
            .collect();

        let assessments = self
            .state
            .gate_scores
            .iter()
            .filter(|(gate, _)| catalog.gate(gate).is_some_and(|g| g.phase == phase))
            .filter_map(|(gate, scores)| {
                scores.last().map(|a| GateAssessment {
                    gate: gate.clone(),
                    assessment: a.clone(),
                })
            })
            .collect();

        PhaseHistory {
            artifacts,
            assessments,
        }
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    pub fn add_artifact(
        &mut self,
        path: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<()> {
        self.state.artifacts.insert(path.into(), content.into());
        self.flush()
    }

    pub fn add_assessment(
        &mut self,
        gate: impl Into<String>,
        assessment: Assessment,
    ) -> Result<()> {
        self.state
            .gate_scores
            .entry(gate.into())
            .or_default()
            .push(assessment);
        self.flush()
    }

    /// Replace the context record for `phase` wholesale. Fields are never
    /// merged with the previous record.
    pub fn update_context(&mut self, phase: Phase, context: PhaseContext) -> Result<()> {
        self.state.context.set(phase, context)?;
        self.flush()
    }

    pub fn set_current_phase(&mut self, phase: Phase) -> Result<()> {
        self.state.current_phase = phase;
        self.flush()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
