use crate::error::Result;
use crate::metrics::{fmt_score, Metrics, Stage};
use crate::readiness::{compute_readiness, ReadinessResult, ReadinessTier, EXECUTION_THRESHOLD};
use crate::risk::{analyze_risk, RiskAnalysis};
use crate::roadmap::{generate_roadmap, ActivatedPhase};
use serde::Serialize;

pub const BLOCKED_HEADLINE: &str = "Roadmap generation blocked.";
pub const BLOCKED_DETAIL: &str = "One or more structural prerequisites have not been satisfied. Resolve gate violations in the Execution Readiness Framework above.";

// ---------------------------------------------------------------------------
// RoadmapOutcome
// ---------------------------------------------------------------------------

/// What the readiness tier allows the roadmap generator to produce.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RoadmapOutcome {
    /// Not Ready. No roadmap exists; `gate_violations` may be empty when the
    /// tier was set by the index or the structural minimum.
    Blocked {
        gate_violations: Vec<String>,
        notice: String,
    },
    /// Conditionally Ready. The roadmap is advisory.
    Directional {
        index: f64,
        notice: String,
        phases: Vec<ActivatedPhase>,
    },
    /// Execution Ready.
    Committed { phases: Vec<ActivatedPhase> },
}

impl RoadmapOutcome {
    pub fn phases(&self) -> Option<&[ActivatedPhase]> {
        match self {
            RoadmapOutcome::Blocked { .. } => None,
            RoadmapOutcome::Directional { phases, .. } | RoadmapOutcome::Committed { phases } => {
                Some(phases)
            }
        }
    }

    pub fn notice(&self) -> Option<&str> {
        match self {
            RoadmapOutcome::Blocked { notice, .. } | RoadmapOutcome::Directional { notice, .. } => {
                Some(notice)
            }
            RoadmapOutcome::Committed { .. } => None,
        }
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, RoadmapOutcome::Blocked { .. })
    }
}

pub fn directional_notice(index: f64) -> String {
    format!(
        "Readiness Index {}/100 — below the Execution Ready threshold of {}. This roadmap is directional. Execution confidence is constrained by weak signals. Validate inputs before committing resources.",
        fmt_score(index),
        fmt_score(EXECUTION_THRESHOLD),
    )
}

// ---------------------------------------------------------------------------
// Assessment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub stage: Stage,
    pub metrics: Metrics,
    pub risk: RiskAnalysis,
    pub readiness: ReadinessResult,
    pub roadmap: RoadmapOutcome,
}

impl Assessment {
    pub fn roadmap(&self) -> Option<&[ActivatedPhase]> {
        self.roadmap.phases()
    }

    /// Pretty-printed JSON. Identical inputs produce identical bytes.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Run the full pipeline. The roadmap generator is never invoked for a
/// `NotReady` tier.
pub fn assess(metrics: &Metrics, stage: Stage) -> Assessment {
    let risk = analyze_risk(metrics, stage);
    let readiness = compute_readiness(metrics);

    let roadmap = match readiness.tier {
        ReadinessTier::NotReady => {
            tracing::debug!(
                index = readiness.index,
                gates = readiness.gate_violations.len(),
                "roadmap suppressed"
            );
            RoadmapOutcome::Blocked {
                gate_violations: readiness.gate_violations.clone(),
                notice: format!("{BLOCKED_HEADLINE} {BLOCKED_DETAIL}"),
            }
        }
        ReadinessTier::ConditionallyReady => RoadmapOutcome::Directional {
            index: readiness.index,
            notice: directional_notice(readiness.index),
            phases: generate_roadmap(metrics, stage, risk.overall_risk),
        },
        ReadinessTier::ExecutionReady => RoadmapOutcome::Committed {
            phases: generate_roadmap(metrics, stage, risk.overall_risk),
        },
    };

    Assessment {
        stage,
        metrics: *metrics,
        risk,
        readiness,
        roadmap,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
