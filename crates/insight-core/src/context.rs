//! Phase-specific context records.
//!
//! Each phase owns at most one context record. The record's shape is fixed by
//! the phase: concept, requirements and design each have their own variant,
//! the three test phases share [`TestContext`], and implementation/integration
//! share [`ImplementationContext`]. Records are replaced wholesale on update.
//!
//! Every field defaults when absent so documents written by older versions
//! still load.

use crate::error::{InsightError, Result};
use crate::types::Phase;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Concept
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConceptContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem_statement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_proposition: Option<String>,
    pub success_criteria: Vec<String>,
    pub constraints: Vec<String>,
    pub decisions: Vec<Decision>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Decision {
    pub date: String,
    pub decision: String,
    pub rationale: String,
}

// ---------------------------------------------------------------------------
// Requirements
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RequirementsContext {
    pub sections: Vec<Section>,
    pub must_requirements: Vec<String>,
    pub should_requirements: Vec<String>,
    pub may_requirements: Vec<String>,
    pub must_not_requirements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subsections: Vec<Subsection>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Subsection {
    pub id: String,
    pub title: String,
    pub content: String,
}

// ---------------------------------------------------------------------------
// Design
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DesignContext {
    pub components: Vec<Component>,
    pub patterns: Vec<Pattern>,
    pub cross_cutting_concerns: Vec<CrossCuttingConcern>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Component {
    pub name: String,
    pub description: String,
    pub responsibilities: Vec<String>,
    pub interfaces: Vec<Interface>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Interface {
    pub name: String,
    pub description: String,
    pub methods: Vec<Method>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Method {
    pub name: String,
    pub description: String,
    pub parameters: Vec<Parameter>,
    pub return_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pattern {
    pub name: String,
    pub description: String,
    pub rationale: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrossCuttingConcern {
    pub name: String,
    pub description: String,
    pub implementation: String,
}

// ---------------------------------------------------------------------------
// Test design (unit-test-design, unit-test-implementation, integration-test-design)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TestContext {
    pub unit_tests: Vec<UnitTestGroup>,
    pub integration_tests: Vec<IntegrationTestGroup>,
    pub shared_fixtures: Vec<Fixture>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UnitTestGroup {
    pub component: String,
    pub test_cases: Vec<UnitTestCase>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UnitTestCase {
    pub name: String,
    pub description: String,
    pub expected_behavior: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setup: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleanup: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IntegrationTestGroup {
    pub components: Vec<String>,
    pub test_cases: Vec<IntegrationTestCase>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IntegrationTestCase {
    pub name: String,
    pub description: String,
    pub workflow: String,
    pub expected_behavior: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setup: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleanup: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fixture {
    pub name: String,
    pub description: String,
    pub setup: String,
    pub cleanup: String,
}

// ---------------------------------------------------------------------------
// Implementation / integration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl fmt::Display for WorkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WorkStatus::NotStarted => "not-started",
            WorkStatus::InProgress => "in-progress",
            WorkStatus::Completed => "completed",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueStatus {
    Open,
    Resolved,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub description: String,
    pub severity: IssueSeverity,
    pub status: IssueStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImplementationContext {
    pub components: Vec<ComponentProgress>,
    pub cross_cutting_concerns: Vec<ConcernProgress>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentProgress {
    pub name: String,
    pub status: WorkStatus,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<Issue>,
}


#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConcernProgress {
    pub name: String,
    pub status: WorkStatus,
}

// ---------------------------------------------------------------------------
// PhaseContext
// ---------------------------------------------------------------------------

/// A context record tagged by the shape it carries.
///
/// Serializes as the bare record; the owning phase supplies the tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PhaseContext {
    Concept(ConceptContext),
    Requirements(RequirementsContext),
    Design(DesignContext),
    Test(TestContext),
    Implementation(ImplementationContext),
}

impl PhaseContext {
    pub fn kind(&self) -> &'static str {
        match self {
            PhaseContext::Concept(_) => "concept",
            PhaseContext::Requirements(_) => "requirements",
            PhaseContext::Design(_) => "design",
            PhaseContext::Test(_) => "test",
            PhaseContext::Implementation(_) => "implementation",
        }
    }

    /// The record shape a phase accepts.
    pub fn kind_for(phase: Phase) -> &'static str {
        match phase {
            Phase::Concept => "concept",
            Phase::Requirements => "requirements",
            Phase::Design => "design",
            Phase::UnitTestDesign | Phase::UnitTestImplementation | Phase::IntegrationTestDesign => {
                "test"
            }
            Phase::Implementation | Phase::Integration => "implementation",
        }
    }

    /// Parse a YAML or JSON document into the record shape `phase` accepts.
    pub fn parse(phase: Phase, text: &str) -> Result<Self> {
        let ctx = match Self::kind_for(phase) {
            "concept" => PhaseContext::Concept(serde_yaml::from_str(text)?),
            "requirements" => PhaseContext::Requirements(serde_yaml::from_str(text)?),
            "design" => PhaseContext::Design(serde_yaml::from_str(text)?),
            "test" => PhaseContext::Test(serde_yaml::from_str(text)?),
            _ => PhaseContext::Implementation(serde_yaml::from_str(text)?),
        };
        Ok(ctx)
    }

    pub fn as_concept(&self) -> Option<&ConceptContext> {
        match self {
            PhaseContext::Concept(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_requirements(&self) -> Option<&RequirementsContext> {
        match self {
            PhaseContext::Requirements(r) => Some(r),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// ContextMap
// ---------------------------------------------------------------------------

/// Persisted per-phase context, keyed by phase wire name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ContextMap {
    #[serde(skip_serializing_if = "Option::is_none")]
    concept: Option<ConceptContext>,
    #[serde(skip_serializing_if = "Option::is_none")]
    requirements: Option<RequirementsContext>,
    #[serde(skip_serializing_if = "Option::is_none")]
    design: Option<DesignContext>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unit_test_design: Option<TestContext>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unit_test_implementation: Option<TestContext>,
    #[serde(skip_serializing_if = "Option::is_none")]
    integration_test_design: Option<TestContext>,
    #[serde(skip_serializing_if = "Option::is_none")]
    implementation: Option<ImplementationContext>,
    #[serde(skip_serializing_if = "Option::is_none")]
    integration: Option<ImplementationContext>,
}

impl ContextMap {
    pub fn get(&self, phase: Phase) -> Option<PhaseContext> {
        match phase {
            Phase::Concept => self.concept.clone().map(PhaseContext::Concept),
            Phase::Requirements => self.requirements.clone().map(PhaseContext::Requirements),
            Phase::Design => self.design.clone().map(PhaseContext::Design),
            Phase::UnitTestDesign => self.unit_test_design.clone().map(PhaseContext::Test),
            Phase::UnitTestImplementation => {
                self.unit_test_implementation.clone().map(PhaseContext::Test)
            }
            Phase::IntegrationTestDesign => {
                self.integration_test_design.clone().map(PhaseContext::Test)
            }
            Phase::Implementation => self
                .implementation
                .clone()
                .map(PhaseContext::Implementation),
            Phase::Integration => self.integration.clone().map(PhaseContext::Implementation),
        }
    }

    /// Replace the record for `phase`. Rejects a record of the wrong shape
    /// and leaves the map untouched in that case.
    pub fn set(&mut self, phase: Phase, context: PhaseContext) -> Result<()> {
        match (phase, context) {
            (Phase::Concept, PhaseContext::Concept(c)) => self.concept = Some(c),
            (Phase::Requirements, PhaseContext::Requirements(r)) => self.requirements = Some(r),
            (Phase::Design, PhaseContext::Design(d)) => self.design = Some(d),
            (Phase::UnitTestDesign, PhaseContext::Test(t)) => self.unit_test_design = Some(t),
            (Phase::UnitTestImplementation, PhaseContext::Test(t)) => {
                self.unit_test_implementation = Some(t)
            }
            (Phase::IntegrationTestDesign, PhaseContext::Test(t)) => {
                self.integration_test_design = Some(t)
            }
            (Phase::Implementation, PhaseContext::Implementation(i)) => {
                self.implementation = Some(i)
            }
            (Phase::Integration, PhaseContext::Implementation(i)) => self.integration = Some(i),
            (phase, other) => {
                return Err(InsightError::ContextMismatch {
                    phase: phase.to_string(),
                    expected: PhaseContext::kind_for(phase),
                    found: other.kind(),
                })
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn concept() -> ConceptContext {
        ConceptContext {
            problem_statement: Some("Test problem".to_string()),
            value_proposition: Some("Test value".to_string()),
            success_criteria: vec!["criterion1".to_string()],
            constraints: vec!["constraint1".to_string()],
            decisions: vec![Decision {
                date: "2024-03-14".to_string(),
                decision: "Test decision".to_string(),
                rationale: "Test rationale".to_string(),
            }],
        }
    }

    #[test]
    fn set_and_get_concept() {
        let mut map = ContextMap::default();
        map.set(Phase::Concept, PhaseContext::Concept(concept()))
            .unwrap();
        assert_eq!(map.get(Phase::Concept), Some(PhaseContext::Concept(concept())));
        assert!(map.get(Phase::Requirements).is_none());
    }

    #[test]
    fn test_phases_share_shape_but_not_storage() {
        let mut map = ContextMap::default();
        let ctx = TestContext {
            shared_fixtures: vec![Fixture {
                name: "tmp-dir".to_string(),
                ..Fixture::default()
            }],
            ..TestContext::default()
        };
        map.set(Phase::UnitTestDesign, PhaseContext::Test(ctx.clone()))
            .unwrap();
        assert_eq!(map.get(Phase::UnitTestDesign), Some(PhaseContext::Test(ctx)));
        assert!(map.get(Phase::UnitTestImplementation).is_none());
        assert!(map.get(Phase::IntegrationTestDesign).is_none());
    }

    #[test]
    fn wrong_shape_is_rejected_without_mutation() {
        let mut map = ContextMap::default();
        let err = map
            .set(Phase::Design, PhaseContext::Concept(concept()))
            .unwrap_err();
        assert!(matches!(
            err,
            InsightError::ContextMismatch { expected: "design", found: "concept", .. }
        ));
        assert_eq!(map, ContextMap::default());
    }

    #[test]
    fn set_replaces_whole_record() {
        let mut map = ContextMap::default();
        map.set(Phase::Concept, PhaseContext::Concept(concept()))
            .unwrap();
        let replacement = ConceptContext {
            problem_statement: Some("Only this".to_string()),
            ..ConceptContext::default()
        };
        map.set(Phase::Concept, PhaseContext::Concept(replacement.clone()))
            .unwrap();
        let got = map.get(Phase::Concept).unwrap();
        let got = got.as_concept().unwrap();
        assert_eq!(got, &replacement);
        assert!(got.decisions.is_empty());
    }

    #[test]
    fn parse_json_requirements() {
        let json = r#"{
            "sections": [{"id": "s1", "title": "Intro", "content": "text",
                          "subsections": [{"id": "s1.1", "title": "Sub", "content": "more"}]}],
            "mustRequirements": ["must1"],
            "shouldRequirements": ["should1"],
            "mayRequirements": ["may1"],
            "mustNotRequirements": ["mustnot1"]
        }"#;
        let ctx = PhaseContext::parse(Phase::Requirements, json).unwrap();
        let req = ctx.as_requirements().unwrap();
        assert_eq!(req.sections[0].subsections[0].id, "s1.1");
        assert_eq!(req.must_not_requirements, vec!["mustnot1".to_string()]);
    }

    #[test]
    fn parse_implementation_statuses() {
        let yaml = r#"
components:
  - name: store
    status: in-progress
    issues:
      - description: flush is slow
        severity: medium
        status: open
crossCuttingConcerns:
  - name: logging
    status: completed
"#;
        let ctx = PhaseContext::parse(Phase::Integration, yaml).unwrap();
        let PhaseContext::Implementation(imp) = ctx else {
            panic!("expected implementation context");
        };
        assert_eq!(imp.components[0].status, WorkStatus::InProgress);
        assert_eq!(imp.components[0].issues[0].status, IssueStatus::Open);
        assert_eq!(imp.components[0].issues[0].severity, IssueSeverity::Medium);
        assert_eq!(imp.cross_cutting_concerns[0].status, WorkStatus::Completed);
    }

    #[test]
    fn invalid_status_fails_to_parse() {
        let yaml = "components:\n  - name: x\n    status: blocked\n";
        assert!(PhaseContext::parse(Phase::Implementation, yaml).is_err());
    }

    #[test]
    fn design_parameter_type_key() {
        let yaml = r#"
components:
  - name: StateStore
    description: owns state
    responsibilities: [persist]
    interfaces:
      - name: Store
        description: api
        methods:
          - name: flush
            description: write
            parameters:
              - name: path
                type: Path
                description: target
            returnType: Result
"#;
        let ctx = PhaseContext::parse(Phase::Design, yaml).unwrap();
        let PhaseContext::Design(d) = ctx else {
            panic!("expected design context");
        };
        let method = &d.components[0].interfaces[0].methods[0];
        assert_eq!(method.parameters[0].ty, "Path");
        assert_eq!(method.return_type, "Result");
    }

    #[test]
    fn context_map_uses_phase_wire_keys() {
        let mut map = ContextMap::default();
        map.set(
            Phase::IntegrationTestDesign,
            PhaseContext::Test(TestContext::default()),
        )
        .unwrap();
        let yaml = serde_yaml::to_string(&map).unwrap();
        assert!(yaml.contains("integration-test-design:"));
        assert!(!yaml.contains("concept"));
    }

    #[test]
    fn older_documents_missing_fields_still_load() {
        let yaml = "concept:\n  problemStatement: legacy\n";
        let map: ContextMap = serde_yaml::from_str(yaml).unwrap();
        let ctx = map.get(Phase::Concept).unwrap();
        let c = ctx.as_concept().unwrap();
        assert_eq!(c.problem_statement.as_deref(), Some("legacy"));
        assert!(c.decisions.is_empty());
    }
}
