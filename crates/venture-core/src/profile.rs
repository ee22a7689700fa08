use crate::assessment::{assess, Assessment};
use crate::error::{EngineError, Result};
use crate::metrics::{Metrics, Stage};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// An idea as stored on disk. YAML or JSON; `serde_yaml` reads both.
///
/// ```yaml
/// title: Fleet maintenance marketplace
/// stage: validation
/// metrics:
///   market_demand: 7.5
///   problem_severity: 6
///   customer_clarity: 5.5
///   differentiation: 4
///   monetization: 6.5
///   scalability: 7
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdeaProfile {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub stage: Stage,
    pub metrics: Metrics,
}

impl IdeaProfile {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(EngineError::ProfileNotFound(path.display().to_string()));
        }
        let data = std::fs::read_to_string(path)?;
        let profile: IdeaProfile = serde_yaml::from_str(&data)?;
        tracing::debug!(title = %profile.title, stage = %profile.stage, "profile loaded");
        Ok(profile)
    }

    pub fn assess(&self) -> Assessment {
        assess(&self.metrics, self.stage)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
