//! The static catalog: prompt text, quality gate definitions, and the map of
//! gated phase transitions.
//!
//! A [`Catalog`] is built once at startup and only ever read afterwards.
//! There is no mutation API; configuration overrides are applied while the
//! catalog is being built (see [`Catalog::with_gates`]).

use crate::types::Phase;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Prompt
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prompt {
    pub phase: Phase,
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
}

// ---------------------------------------------------------------------------
// QualityGate
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub threshold: f64,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

impl Criterion {
    pub fn new(name: &str, description: &str, threshold: f64, weight: f64) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            threshold,
            weight,
        }
    }
}

/// What must be satisfied to leave `phase` through this gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityGate {
    pub name: String,
    pub phase: Phase,
    pub criteria: Vec<Criterion>,
}

impl QualityGate {
    pub fn criterion(&self, name: &str) -> Option<&Criterion> {
        self.criteria.iter().find(|c| c.name == name)
    }

    pub fn criterion_names(&self) -> Vec<String> {
        self.criteria.iter().map(|c| c.name.clone()).collect()
    }
}

// ---------------------------------------------------------------------------
// Gate names
// ---------------------------------------------------------------------------

pub const CONCEPT_TO_REQUIREMENTS: &str = "conceptToRequirements";
pub const REQUIREMENTS_TO_DESIGN: &str = "requirementsToDesign";

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Catalog {
    prompts: Vec<Prompt>,
    gates: BTreeMap<String, QualityGate>,
    transitions: Vec<(Phase, Phase, String)>,
}

impl Catalog {
    pub fn new(
        prompts: Vec<Prompt>,
        gates: Vec<QualityGate>,
        transitions: Vec<(Phase, Phase, String)>,
    ) -> Self {
        Self {
            prompts,
            gates: gates.into_iter().map(|g| (g.name.clone(), g)).collect(),
            transitions,
        }
    }

    /// The catalog shipped with the tool.
    pub fn builtin() -> Self {
        Self::new(builtin_prompts(), builtin_gates(), builtin_transitions())
    }

    /// Consume the catalog, adding `overrides` and replacing any gate that
    /// shares a name with one of them.
    pub fn with_gates(mut self, overrides: impl IntoIterator<Item = QualityGate>) -> Self {
        for gate in overrides {
            self.gates.insert(gate.name.clone(), gate);
        }
        self
    }

    /// Exact match on phase and prompt type.
    pub fn prompt_for_phase(&self, phase: Phase, kind: &str) -> Option<&str> {
        self.prompts
            .iter()
            .find(|p| p.phase == phase && p.kind == kind)
            .map(|p| p.content.as_str())
    }

    pub fn prompts(&self) -> &[Prompt] {
        &self.prompts
    }

    pub fn prompts_for(&self, phase: Phase) -> impl Iterator<Item = &Prompt> {
        self.prompts.iter().filter(move |p| p.phase == phase)
    }

    pub fn gate(&self, name: &str) -> Option<&QualityGate> {
        self.gates.get(name)
    }

    /// All gates, ordered by name.
    pub fn gates(&self) -> impl Iterator<Item = &QualityGate> {
        self.gates.values()
    }

    /// Name of the gate guarding `from -> to`, if that move is modeled.
    pub fn gate_for_transition(&self, from: Phase, to: Phase) -> Option<&str> {
        self.transitions
            .iter()
            .find(|(f, t, _)| *f == from && *t == to)
            .map(|(_, _, gate)| gate.as_str())
    }

    pub fn transitions(&self) -> &[(Phase, Phase, String)] {
        &self.transitions
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

// ---------------------------------------------------------------------------
// Builtin content
// ---------------------------------------------------------------------------

fn builtin_transitions() -> Vec<(Phase, Phase, String)> {
    vec![
        (
            Phase::Concept,
            Phase::Requirements,
            CONCEPT_TO_REQUIREMENTS.to_string(),
        ),
        (
            Phase::Requirements,
            Phase::Design,
            REQUIREMENTS_TO_DESIGN.to_string(),
        ),
    ]
}

fn builtin_gates() -> Vec<QualityGate> {
    vec![
        QualityGate {
            name: CONCEPT_TO_REQUIREMENTS.to_string(),
            phase: Phase::Concept,
            criteria: vec![
                Criterion::new(
                    "problemClarity",
                    "The core problem and intended users are understood well enough to draft requirements",
                    8.0,
                    0.4,
                ),
                Criterion::new(
                    "valueProposition",
                    "The value delivered to users is explicit",
                    8.0,
                    0.3,
                ),
                Criterion::new(
                    "scopeDefinition",
                    "Scope and constraints are bounded appropriately for the concept",
                    8.0,
                    0.3,
                ),
            ],
        },
        QualityGate {
            name: REQUIREMENTS_TO_DESIGN.to_string(),
            phase: Phase::Requirements,
            criteria: vec![
                Criterion::new(
                    "completeness",
                    "Requirements cover the concept without gaps",
                    8.0,
                    0.4,
                ),
                Criterion::new(
                    "consistency",
                    "Requirements are numbered, orthogonal and do not contradict each other",
                    8.0,
                    0.3,
                ),
                Criterion::new(
                    "testability",
                    "Each requirement is atomic and verifiable",
                    8.0,
                    0.3,
                ),
            ],
        },
    ]
}

fn prompt(phase: Phase, kind: &str, content: &str) -> Prompt {
    Prompt {
        phase,
        kind: kind.to_string(),
        content: content.to_string(),
    }
}

fn builtin_prompts() -> Vec<Prompt> {
    vec![
        prompt(
            Phase::Concept,
            "refinement",
            "Help the user refine their software concept before it is time to work on requirements. \
No code please. Do not solution. Act as a collaborative thought partner: ask open-ended questions \
about the core problem, the intended users and what success looks like. Reflect your understanding \
back, surface assumptions, and when technical details come up redirect to the user's needs by asking \
what problem they would solve. The goal is to refine the concept just enough to write requirements, \
including its scope, which could be anything from a tiny script to a multi-tenant SaaS platform.",
        ),
        prompt(
            Phase::Concept,
            "assessment",
            "As a world-class technical product manager, on a scale of 0 to 10 rate whether there is \
enough concept information to write a first comprehensive draft of functional and non-functional \
requirements. The goal is not to already have requirements from the user, but to understand the \
user's goal well enough to draft them, making reasonable assumptions where needed.\n\n\
STOP after the assessment and wait for the user to provide feedback.",
        ),
        prompt(
            Phase::Concept,
            "brief",
            "As a world-class technical product manager create a comprehensive product brief based on \
our discussion. Focus on capturing:\n\
1. Problem Statement\n\
2. Value Proposition\n\
3. Success Criteria\n\
4. Constraints\n\
5. Key Decisions (with rationale)\n\n\
Keep the brief clear, concise, and focused on the core concept without jumping into implementation \
details. Do not include meta-commentary, just the brief.",
        ),
        prompt(
            Phase::Requirements,
            "creation",
            "As a world-class technical product manager create a comprehensive requirements document \
for the concept. Number every requirement hierarchically (e.g. 3.1.2.3) and mark each one MUST, \
SHOULD, MAY or MUST NOT. Use the sections: Introduction, Terms and Definitions, Functional \
Requirements, Non-Functional Requirements, Constraints, Out of Scope, Acceptance Criteria, \
Verification and Validation, Glossary, References. Each requirement must be atomic, specific and \
verifiable. Do not include timelines, deadlines or performance metrics unless asked, and keep the \
requirements scoped to the concept.",
        ),
        prompt(
            Phase::Requirements,
            "assessment",
            "As a world-class software architect, on a scale of 0 to 10, how ready are these \
requirements to support implementation? Pay particular attention to completeness given the concept, \
consistency, orthogonality, and elegance. Everything in the requirements must be numbered and \
appropriate to the scope of the concept.\n\n\
STOP after the assessment and wait for the user to provide feedback.",
        ),
        prompt(
            Phase::Design,
            "levels",
            "As a world-class software architect, analyze the requirements and identify every level \
of abstraction this system's design needs, from system architecture down to method signatures. For \
each level state its purpose, the decisions it must settle, and which requirements it addresses.",
        ),
        prompt(
            Phase::Design,
            "assessment",
            "As a world-class software architect, assess this level's design on a scale of 0 to 10 \
for coverage of the requirements, cohesion of components, clarity of interfaces, and consistency \
with the decisions made at higher levels. List concrete recommendations for anything below 8.",
        ),
        prompt(
            Phase::Design,
            "interface-review",
            "As a world-class software architect, review every interface defined so far across all \
design levels. Flag inconsistent naming, missing error cases, leaky abstractions and duplicated \
responsibilities, and propose corrected signatures.",
        ),
        prompt(
            Phase::UnitTestDesign,
            "creation",
            "For each component in the design, enumerate unit test cases: name, description, expected \
behavior, and any setup or cleanup. Identify fixtures that can be shared across components.",
        ),
        prompt(
            Phase::IntegrationTestDesign,
            "creation",
            "For each major subsystem or workflow, design integration tests that exercise the \
components together: list the components involved, the workflow under test, expected behavior, \
and the setup and cleanup each test needs.",
        ),
        prompt(
            Phase::Implementation,
            "mocks",
            "Review the complete system design. For each interface create a mock that honors its \
contract so dependent components can be implemented and tested in isolation. Keep mocks consistent \
with the interface definitions as they evolve.",
        ),
        prompt(
            Phase::Implementation,
            "paired",
            "For each method in the system: write the tests first from the test design, implement the \
method until they pass, then review both against the design and record any issues found.",
        ),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
