use crate::catalog::Catalog;
use crate::error::{InsightError, Result};
use crate::gate::GateEvaluator;
use crate::state::StateStore;
use crate::types::Phase;
use serde::Serialize;

// ---------------------------------------------------------------------------
// TransitionOutcome
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionOutcome {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_assessments: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// TransitionController
// ---------------------------------------------------------------------------

/// Moves the process between phases when the guarding gate allows it.
///
/// `from` is taken as given by the caller; it is not checked against the
/// store's current phase.
#[derive(Debug, Clone, Copy)]
pub struct TransitionController<'a> {
    catalog: &'a Catalog,
}

impl<'a> TransitionController<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    pub fn attempt(
        &self,
        store: &mut StateStore,
        from: Phase,
        to: Phase,
    ) -> Result<TransitionOutcome> {
        let gate = self.catalog.gate_for_transition(from, to).ok_or_else(|| {
            InsightError::UnsupportedTransition {
                from: from.to_string(),
                to: to.to_string(),
            }
        })?;

        if store.current_phase() != from {
            tracing::debug!(
                from = %from,
                current = %store.current_phase(),
                "transition requested from a phase other than the current one"
            );
        }

        let evaluation = GateEvaluator::new(self.catalog).evaluate(store, gate)?;
        if !evaluation.passed {
            tracing::debug!(
                gate,
                missing = ?evaluation.missing_criteria,
                "transition blocked by gate"
            );
            return Ok(TransitionOutcome {
                success: false,
                message: format!(
                    "Cannot transition to {to}. Missing criteria: {}",
                    evaluation.missing_criteria.join(", ")
                ),
                required_assessments: Some(evaluation.missing_criteria),
            });
        }

        store.set_current_phase(to)?;
        tracing::info!(from = %from, to = %to, gate, "phase transition committed");

        Ok(TransitionOutcome {
            success: true,
            message: format!("Successfully transitioned to {to}"),
            required_assessments: None,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::Assessment;
    use crate::catalog::{CONCEPT_TO_REQUIREMENTS, REQUIREMENTS_TO_DESIGN};
    use tempfile::TempDir;

    fn open(dir: &TempDir) -> StateStore {
        StateStore::open(dir.path().join("state.yaml"))
    }

    #[test]
    fn undefined_pair_is_an_error_regardless_of_history() {
        let dir = TempDir::new().unwrap();
        let mut store = open(&dir);
        store
            .add_assessment(CONCEPT_TO_REQUIREMENTS, Assessment::new(10.0, "great"))
            .unwrap();
        let catalog = Catalog::builtin();
        let err = TransitionController::new(&catalog)
            .attempt(&mut store, Phase::Concept, Phase::Design)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "no gate defined for transition concept -> design"
        );
        assert_eq!(store.current_phase(), Phase::Concept);
    }

    #[test]
    fn backwards_transition_is_undefined() {
        let dir = TempDir::new().unwrap();
        let mut store = open(&dir);
        let catalog = Catalog::builtin();
        let err = TransitionController::new(&catalog)
            .attempt(&mut store, Phase::Requirements, Phase::Concept)
            .unwrap_err();
        assert!(matches!(err, InsightError::UnsupportedTransition { .. }));
    }

    #[test]
    fn blocked_without_assessments() {
        let dir = TempDir::new().unwrap();
        let mut store = open(&dir);
        let catalog = Catalog::builtin();
        let outcome = TransitionController::new(&catalog)
            .attempt(&mut store, Phase::Concept, Phase::Requirements)
            .unwrap();
        assert!(!outcome.success);
        let expected = catalog
            .gate(CONCEPT_TO_REQUIREMENTS)
            .unwrap()
            .criterion_names();
        assert_eq!(outcome.required_assessments.as_ref(), Some(&expected));
        assert_eq!(
            outcome.message,
            format!(
                "Cannot transition to requirements. Missing criteria: {}",
                expected.join(", ")
            )
        );
        assert_eq!(store.current_phase(), Phase::Concept);
        assert!(!store.path().exists(), "a blocked transition must not flush");
    }

    #[test]
    fn passing_gate_commits_and_persists() {
        let dir = TempDir::new().unwrap();
        let mut store = open(&dir);
        store
            .add_assessment(CONCEPT_TO_REQUIREMENTS, Assessment::new(9.0, "Clear concept"))
            .unwrap();
        let catalog = Catalog::builtin();
        let outcome = TransitionController::new(&catalog)
            .attempt(&mut store, Phase::Concept, Phase::Requirements)
            .unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.message, "Successfully transitioned to requirements");
        assert!(outcome.required_assessments.is_none());
        assert_eq!(store.current_phase(), Phase::Requirements);
        assert_eq!(open(&dir).current_phase(), Phase::Requirements);
    }

    #[test]
    fn from_is_not_checked_against_current_phase() {
        let dir = TempDir::new().unwrap();
        let mut store = open(&dir);
        store
            .add_assessment(REQUIREMENTS_TO_DESIGN, Assessment::new(9.5, "ready"))
            .unwrap();
        let catalog = Catalog::builtin();
        // still in concept, but the caller claims requirements
        let outcome = TransitionController::new(&catalog)
            .attempt(&mut store, Phase::Requirements, Phase::Design)
            .unwrap();
        assert!(outcome.success);
        assert_eq!(store.current_phase(), Phase::Design);
    }

    #[test]
    fn flush_failure_surfaces_from_commit() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "file, not a directory").unwrap();
        let mut store = StateStore::open(blocker.join("state.yaml"));

        // memory keeps the assessment even though it could not be persisted
        store
            .add_assessment(CONCEPT_TO_REQUIREMENTS, Assessment::new(9.0, "ok"))
            .unwrap_err();

        let catalog = Catalog::builtin();
        let err = TransitionController::new(&catalog)
            .attempt(&mut store, Phase::Concept, Phase::Requirements)
            .unwrap_err();
        assert!(matches!(err, InsightError::Persist { .. }));
        assert_eq!(store.current_phase(), Phase::Requirements);
    }
}
