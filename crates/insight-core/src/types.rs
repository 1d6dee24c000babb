use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    #[default]
    Concept,
    Requirements,
    Design,
    UnitTestDesign,
    UnitTestImplementation,
    IntegrationTestDesign,
    Implementation,
    Integration,
}

impl Phase {
    pub fn all() -> &'static [Phase] {
        &[
            Phase::Concept,
            Phase::Requirements,
            Phase::Design,
            Phase::UnitTestDesign,
            Phase::UnitTestImplementation,
            Phase::IntegrationTestDesign,
            Phase::Implementation,
            Phase::Integration,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Concept => "concept",
            Phase::Requirements => "requirements",
            Phase::Design => "design",
            Phase::UnitTestDesign => "unit-test-design",
            Phase::UnitTestImplementation => "unit-test-implementation",
            Phase::IntegrationTestDesign => "integration-test-design",
            Phase::Implementation => "implementation",
            Phase::Integration => "integration",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Phase {
    type Err = crate::error::InsightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Phase::all()
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| crate::error::InsightError::InvalidPhase(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
