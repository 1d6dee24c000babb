use crate::catalog::{Catalog, QualityGate};
use crate::error::Result;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// ProjectConfig / StateConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateConfig {
    /// State document location, relative to the project root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub state: StateConfig,
    /// Gate definitions added to, or replacing, the builtin ones.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub gates: BTreeMap<String, QualityGate>,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self::new("")
    }
}

impl Config {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            version: 1,
            project: ProjectConfig {
                name: project_name.into(),
                description: None,
            },
            state: StateConfig::default(),
            gates: BTreeMap::new(),
        }
    }

    /// Load `.insight/config.yaml`, or the defaults when there is none.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())?;
        Ok(())
    }

    pub fn state_path(&self, root: &Path) -> PathBuf {
        match &self.state.path {
            Some(p) => root.join(p),
            None => paths::state_path(root),
        }
    }

    /// The builtin catalog with this config's gate overrides applied. The
    /// map key names the gate it defines or replaces.
    pub fn catalog(&self) -> Catalog {
        Catalog::builtin().with_gates(self.gates.iter().map(|(key, gate)| QualityGate {
            name: key.clone(),
            ..gate.clone()
        }))
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        for (key, gate) in &self.gates {
            if key != &gate.name {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!(
                        "gate key '{key}' does not match its name '{}'",
                        gate.name
                    ),
                });
            }

            if gate.criteria.is_empty() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!("gate '{key}' has no criteria and always passes"),
                });
            }

            for c in &gate.criteria {
                if !(0.0..=10.0).contains(&c.threshold) {
                    warnings.push(ConfigWarning {
                        level: WarnLevel::Warning,
                        message: format!(
                            "criterion '{}' on gate '{key}' has threshold {} outside 0-10",
                            c.name, c.threshold
                        ),
                    });
                }
                if c.weight <= 0.0 {
                    warnings.push(ConfigWarning {
                        level: WarnLevel::Warning,
                        message: format!(
                            "criterion '{}' on gate '{key}' has non-positive weight {}",
                            c.name, c.weight
                        ),
                    });
                }
            }
        }

        let catalog = self.catalog();
        for (from, to, gate) in catalog.transitions() {
            if let Some(def) = catalog.gate(gate) {
                if def.phase != *from {
                    warnings.push(ConfigWarning {
                        level: WarnLevel::Warning,
                        message: format!(
                            "gate '{gate}' guards {from} -> {to} but is defined for phase '{}'",
                            def.phase
                        ),
                    });
                }
            }
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
