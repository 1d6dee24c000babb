use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Assessment
// ---------------------------------------------------------------------------

/// An expert evaluation submitted against a quality gate.
///
/// Assessments are appended to a gate's history and never edited. Scores are
/// expected on a 0–10 scale but the range is not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub score: f64,
    pub explanation: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
    /// When set, the assessment speaks only to this criterion of the gate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criterion_name: Option<String>,
}

impl Assessment {
    pub fn new(score: f64, explanation: impl Into<String>) -> Self {
        Self {
            score,
            explanation: explanation.into(),
            recommendations: Vec::new(),
            criterion_name: None,
        }
    }

    pub fn with_recommendations(mut self, recommendations: Vec<String>) -> Self {
        self.recommendations = recommendations;
        self
    }

    pub fn for_criterion(mut self, criterion: impl Into<String>) -> Self {
        self.criterion_name = Some(criterion.into());
        self
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
