use crate::activation::{ActivationContext, ACTIVATION_RULES};
use crate::metrics::{Metrics, Stage};
use crate::phases::{phase, stage_modifier, RoadmapPhase};
use crate::risk::RiskLevel;
use serde::Serialize;

// ---------------------------------------------------------------------------
// ActivatedPhase (output)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivatedPhase {
    /// 1-based position in the generated roadmap.
    pub sequence: u32,
    #[serde(flatten)]
    pub phase: &'static RoadmapPhase,
    pub stage_modifier: i32,
    pub effective_priority: i32,
    pub activation_reason: String,
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

/// Evaluate every activation rule, shift included phases by the stage's
/// modifier, and sequence them by effective priority. Equal priorities keep
/// library order.
///
/// Callers gate this on readiness: a `NotReady` tier must not produce a
/// roadmap. See [`crate::assessment::assess`].
pub fn generate_roadmap(metrics: &Metrics, stage: Stage, risk: RiskLevel) -> Vec<ActivatedPhase> {
    let ctx = ActivationContext {
        metrics,
        stage,
        risk,
    };

    let mut activated: Vec<ActivatedPhase> = ACTIVATION_RULES
        .iter()
        .filter_map(|rule| {
            let reason = (rule.evaluate)(&ctx).filter(|r| !r.is_empty())?;
            let phase = phase(rule.phase);
            let modifier = stage_modifier(stage, phase.id);
            Some(ActivatedPhase {
                sequence: 0,
                phase,
                stage_modifier: modifier,
                effective_priority: phase.base_priority + modifier,
                activation_reason: reason,
            })
        })
        .collect();

    activated.sort_by_key(|a| (a.effective_priority, a.phase.declaration_index));
    for (i, a) in activated.iter_mut().enumerate() {
        a.sequence = i as u32 + 1;
    }

    tracing::debug!(stage = %stage, risk = %risk, phases = activated.len(), "roadmap generated");
    activated
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
