use crate::assessment::Assessment;
use crate::catalog::{Catalog, QualityGate};
use crate::error::{InsightError, Result};
use crate::state::StateStore;
use serde::Serialize;
use std::collections::HashSet;

// ---------------------------------------------------------------------------
// GateEvaluation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GateEvaluation {
    pub gate: String,
    pub passed: bool,
    /// The assessment the verdict was based on (zero or one entries).
    pub scores: Vec<Assessment>,
    /// Unsatisfied criteria, in catalog order.
    pub missing_criteria: Vec<String>,
}

// ---------------------------------------------------------------------------
// GateEvaluator
// ---------------------------------------------------------------------------

/// Decides whether a quality gate is satisfied.
///
/// Only the most recent assessment recorded for the gate is considered.
/// An assessment naming a criterion can satisfy at most that criterion; one
/// without a name is checked against every criterion's threshold.
#[derive(Debug, Clone, Copy)]
pub struct GateEvaluator<'a> {
    catalog: &'a Catalog,
}

impl<'a> GateEvaluator<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    pub fn evaluate(&self, store: &StateStore, gate_name: &str) -> Result<GateEvaluation> {
        let gate = self
            .catalog
            .gate(gate_name)
            .ok_or_else(|| InsightError::UnknownGate(gate_name.to_string()))?;
        let latest = store.latest_assessment(gate_name);
        Ok(judge(gate, latest))
    }
}

/// Score `latest` against `gate`'s criteria.
pub fn judge(gate: &QualityGate, latest: Option<&Assessment>) -> GateEvaluation {
    let mut satisfied: HashSet<&str> = HashSet::new();

    if let Some(a) = latest {
        match a.criterion_name.as_deref() {
            Some(name) => {
                if let Some(c) = gate.criterion(name) {
                    if a.score >= c.threshold {
                        satisfied.insert(c.name.as_str());
                    }
                }
            }
            None => {
                for c in &gate.criteria {
                    if a.score >= c.threshold {
                        satisfied.insert(c.name.as_str());
                    }
                }
            }
        }
    }

    let missing_criteria: Vec<String> = gate
        .criteria
        .iter()
        .filter(|c| !satisfied.contains(c.name.as_str()))
        .map(|c| c.name.clone())
        .collect();

    GateEvaluation {
        gate: gate.name.clone(),
        passed: missing_criteria.is_empty(),
        scores: latest.cloned().into_iter().collect(),
        missing_criteria,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
