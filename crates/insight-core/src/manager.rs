use crate::assessment::Assessment;
use crate::catalog::Catalog;
use crate::config::Config;
use crate::context::{Decision, PhaseContext};
use crate::error::{InsightError, Result};
use crate::gate::{GateEvaluation, GateEvaluator};
use crate::state::{PhaseHistory, StateStore};
use crate::transition::{TransitionController, TransitionOutcome};
use crate::types::Phase;
use std::path::Path;

/// Single entry point over one project's process state.
///
/// Owns the store and the (immutable) catalog; evaluators and controllers
/// borrow them per call.
#[derive(Debug)]
pub struct PhaseManager {
    store: StateStore,
    catalog: Catalog,
}

impl PhaseManager {
    pub fn new(store: StateStore, catalog: Catalog) -> Self {
        Self { store, catalog }
    }

    /// Builtin catalog, state under `<root>/.insight/state.yaml`.
    pub fn open(root: &Path) -> Self {
        Self::new(StateStore::open_in(root), Catalog::builtin())
    }

    /// Honors the config's state path and gate overrides.
    pub fn with_config(root: &Path, config: &Config) -> Self {
        Self::new(StateStore::open(config.state_path(root)), config.catalog())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn current_phase(&self) -> Phase {
        self.store.current_phase()
    }

    pub fn prompt_for_phase(&self, phase: Phase, kind: &str) -> Option<&str> {
        self.catalog.prompt_for_phase(phase, kind)
    }

    // -----------------------------------------------------------------------
    // Artifacts
    // -----------------------------------------------------------------------

    pub fn add_artifact(&mut self, path: &str, content: &str) -> Result<()> {
        self.store.add_artifact(path, content)
    }

    pub fn artifact(&self, path: &str) -> Option<&str> {
        self.store.artifact(path)
    }

    // -----------------------------------------------------------------------
    // Gates
    // -----------------------------------------------------------------------

    pub fn add_assessment(&mut self, gate: &str, assessment: Assessment) -> Result<()> {
        self.store.add_assessment(gate, assessment)
    }

    pub fn latest_assessment(&self, gate: &str) -> Option<&Assessment> {
        self.store.latest_assessment(gate)
    }

    pub fn evaluate_gate(&self, gate: &str) -> Result<GateEvaluation> {
        GateEvaluator::new(&self.catalog).evaluate(&self.store, gate)
    }

    /// Evaluate every gate in the catalog, in name order.
    pub fn evaluate_all(&self) -> Vec<GateEvaluation> {
        let evaluator = GateEvaluator::new(&self.catalog);
        self.catalog
            .gates()
            .filter_map(|g| evaluator.evaluate(&self.store, &g.name).ok())
            .collect()
    }

    pub fn attempt_transition(&mut self, from: Phase, to: Phase) -> Result<TransitionOutcome> {
        TransitionController::new(&self.catalog).attempt(&mut self.store, from, to)
    }

    // -----------------------------------------------------------------------
    // Context
    // -----------------------------------------------------------------------

    pub fn update_context(&mut self, phase: Phase, context: PhaseContext) -> Result<()> {
        self.store.update_context(phase, context)
    }

    pub fn context(&self, phase: Phase) -> Option<PhaseContext> {
        self.store.context(phase)
    }

    /// Append a decision to the concept context, creating it if needed.
    pub fn record_decision(
        &mut self,
        date: &str,
        decision: &str,
        rationale: &str,
    ) -> Result<()> {
        let mut concept = match self.store.context(Phase::Concept) {
            Some(PhaseContext::Concept(c)) => c,
            Some(other) => {
                return Err(InsightError::ContextMismatch {
                    phase: Phase::Concept.to_string(),
                    expected: PhaseContext::kind_for(Phase::Concept),
                    found: other.kind(),
                })
            }
            None => Default::default(),
        };
        concept.decisions.push(Decision {
            date: date.to_string(),
            decision: decision.to_string(),
            rationale: rationale.to_string(),
        });
        self.store
            .update_context(Phase::Concept, PhaseContext::Concept(concept))
    }

    pub fn phase_history(&self, phase: Phase) -> PhaseHistory {
        self.store.phase_history(phase, &self.catalog)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CONCEPT_TO_REQUIREMENTS, REQUIREMENTS_TO_DESIGN};
    use crate::context::ConceptContext;
    use tempfile::TempDir;

    #[test]
    fn fresh_project_starts_in_concept() {
        let dir = TempDir::new().unwrap();
        let mgr = PhaseManager::open(dir.path());
        assert_eq!(mgr.current_phase(), Phase::Concept);
        assert!(mgr.artifact("concept/brief.md").is_none());
        assert!(mgr.latest_assessment(CONCEPT_TO_REQUIREMENTS).is_none());
    }

    #[test]
    fn prompts_come_from_catalog() {
        let dir = TempDir::new().unwrap();
        let mgr = PhaseManager::open(dir.path());
        let prompt = mgr.prompt_for_phase(Phase::Concept, "refinement").unwrap();
        assert!(prompt.starts_with("Help the user refine their software concept"));
        assert!(mgr.prompt_for_phase(Phase::Integration, "refinement").is_none());
    }

    #[test]
    fn full_walk_concept_to_design() {
        let dir = TempDir::new().unwrap();
        let mut mgr = PhaseManager::open(dir.path());

        mgr.add_artifact("concept/brief.md", "# Brief").unwrap();
        mgr.add_assessment(CONCEPT_TO_REQUIREMENTS, Assessment::new(8.5, "solid"))
            .unwrap();
        let outcome = mgr
            .attempt_transition(Phase::Concept, Phase::Requirements)
            .unwrap();
        assert!(outcome.success);

        let blocked = mgr
            .attempt_transition(Phase::Requirements, Phase::Design)
            .unwrap();
        assert!(!blocked.success);
        assert_eq!(mgr.current_phase(), Phase::Requirements);

        mgr.add_assessment(REQUIREMENTS_TO_DESIGN, Assessment::new(9.0, "complete"))
            .unwrap();
        assert!(mgr.evaluate_gate(REQUIREMENTS_TO_DESIGN).unwrap().passed);
        assert!(
            mgr.attempt_transition(Phase::Requirements, Phase::Design)
                .unwrap()
                .success
        );

        let reopened = PhaseManager::open(dir.path());
        assert_eq!(reopened.current_phase(), Phase::Design);
        assert_eq!(reopened.artifact("concept/brief.md"), Some("# Brief"));
    }

    #[test]
    fn evaluate_all_covers_every_gate() {
        let dir = TempDir::new().unwrap();
        let mgr = PhaseManager::open(dir.path());
        let evals = mgr.evaluate_all();
        assert_eq!(evals.len(), mgr.catalog().gates().count());
        assert!(evals.iter().all(|e| !e.passed));
    }

    #[test]
    fn record_decision_appends_to_existing_concept() {
        let dir = TempDir::new().unwrap();
        let mut mgr = PhaseManager::open(dir.path());
        mgr.update_context(
            Phase::Concept,
            PhaseContext::Concept(ConceptContext {
                problem_statement: Some("Drift between design and code".to_string()),
                ..Default::default()
            }),
        )
        .unwrap();
        mgr.record_decision("2024-01-02", "Gate every phase", "Keeps quality visible")
            .unwrap();
        mgr.record_decision("2024-01-03", "YAML state", "Diffable")
            .unwrap();

        let ctx = mgr.context(Phase::Concept).unwrap();
        let concept = ctx.as_concept().unwrap();
        assert_eq!(
            concept.problem_statement.as_deref(),
            Some("Drift between design and code")
        );
        assert_eq!(concept.decisions.len(), 2);
        assert_eq!(concept.decisions[1].decision, "YAML state");
    }

    #[test]
    fn history_scopes_artifacts_and_gates() {
        let dir = TempDir::new().unwrap();
        let mut mgr = PhaseManager::open(dir.path());
        mgr.add_artifact("concept/brief.md", "b").unwrap();
        mgr.add_artifact("requirements/spec.md", "r").unwrap();
        mgr.add_assessment(CONCEPT_TO_REQUIREMENTS, Assessment::new(6.0, "first"))
            .unwrap();
        mgr.add_assessment(CONCEPT_TO_REQUIREMENTS, Assessment::new(9.0, "second"))
            .unwrap();

        let history = mgr.phase_history(Phase::Concept);
        assert_eq!(history.artifacts, vec!["concept/brief.md".to_string()]);
        assert_eq!(history.assessments.len(), 1);
        assert_eq!(history.assessments[0].assessment.explanation, "second");
    }

    #[test]
    fn config_overrides_state_path_and_gates() {
        let dir = TempDir::new().unwrap();
        let cfg: Config = serde_yaml::from_str(
            "version: 1\nstate:\n  path: custom/state.yaml\ngates:\n  conceptToRequirements:\n    name: conceptToRequirements\n    phase: concept\n    criteria:\n      - name: clarity\n        threshold: 5\n",
        )
        .unwrap();
        let mut mgr = PhaseManager::with_config(dir.path(), &cfg);
        mgr.add_assessment(CONCEPT_TO_REQUIREMENTS, Assessment::new(5.0, "ok"))
            .unwrap();
        assert!(mgr.evaluate_gate(CONCEPT_TO_REQUIREMENTS).unwrap().passed);
        assert!(dir.path().join("custom/state.yaml").exists());
    }
}
