use crate::error::{EngineError, Result};
use crate::metrics::Stage;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// PhaseId
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PhaseId {
    ProblemValidation,
    IcpRefinement,
    DemandVerification,
    Positioning,
    MvpBuild,
    MonetizationTesting,
    TractionValidation,
    UnitEconomics,
    ScalabilityAssessment,
    GrowthOptimization,
    CapitalStrategy,
    PivotAssessment,
}

impl PhaseId {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PhaseId::ProblemValidation => "problem-validation",
            PhaseId::IcpRefinement => "icp-refinement",
            PhaseId::DemandVerification => "demand-verification",
            PhaseId::Positioning => "positioning",
            PhaseId::MvpBuild => "mvp-build",
            PhaseId::MonetizationTesting => "monetization-testing",
            PhaseId::TractionValidation => "traction-validation",
            PhaseId::UnitEconomics => "unit-economics",
            PhaseId::ScalabilityAssessment => "scalability-assessment",
            PhaseId::GrowthOptimization => "growth-optimization",
            PhaseId::CapitalStrategy => "capital-strategy",
            PhaseId::PivotAssessment => "pivot-assessment",
        }
    }
}

impl fmt::Display for PhaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PhaseId {
    type Err = EngineError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        PHASE_LIBRARY
            .iter()
            .map(|p| p.id)
            .find(|id| id.as_str() == s)
            .ok_or_else(|| EngineError::UnknownPhase(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// PhaseKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    Mandatory,
    Conditional,
    Optional,
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PhaseKind::Mandatory => "mandatory",
            PhaseKind::Conditional => "conditional",
            PhaseKind::Optional => "optional",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// RoadmapPhase
// ---------------------------------------------------------------------------

/// One remediation workstream in the phase library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoadmapPhase {
    pub id: PhaseId,
    pub name: &'static str,
    pub objective: &'static str,
    pub actions: &'static [&'static str],
    pub success_criteria: &'static str,
    pub risk_mitigated: &'static str,
    pub duration: &'static str,
    #[serde(rename = "type")]
    pub kind: PhaseKind,
    /// Lower sorts earlier.
    pub base_priority: i32,
    /// Position in the library. Breaks ties between equal effective priorities.
    pub declaration_index: usize,
    pub icon_key: &'static str,
}

pub static PHASE_LIBRARY: [RoadmapPhase; 12] = [
    RoadmapPhase {
        id: PhaseId::ProblemValidation,
        name: "Validate Problem Hypothesis",
        objective: "Confirm problem severity justifies behavioral change and switching costs.",
        actions: &[
            "Conduct 20+ structured problem interviews with target segment",
            "Map existing solutions and workaround patterns",
            "Quantify cost-of-inaction for target personas",
        ],
        success_criteria: "70%+ of interviewees confirm active solution-seeking behavior.",
        risk_mitigated: "Problem Irrelevance",
        duration: "2–4 weeks",
        kind: PhaseKind::Mandatory,
        base_priority: 1,
        declaration_index: 0,
        icon_key: "search",
    },
    RoadmapPhase {
        id: PhaseId::IcpRefinement,
        name: "Refine ICP Definition",
        objective: "Establish precise customer profile to enable channel optimization.",
        actions: &[
            "Segment initial users by firmographics and behavior",
            "Identify highest-intent subsegment via engagement scoring",
            "Document ICP with quantifiable inclusion/exclusion criteria",
        ],
        success_criteria: "ICP defined with 3+ measurable attributes and validated against pipeline.",
        risk_mitigated: "ICP Misalignment",
        duration: "2–3 weeks",
        kind: PhaseKind::Conditional,
        base_priority: 2,
        declaration_index: 1,
        icon_key: "users",
    },
    RoadmapPhase {
        id: PhaseId::DemandVerification,
        name: "Verify Market Demand",
        objective: "Validate willingness-to-engage before committing development resources.",
        actions: &[
            "Deploy landing page with value proposition A/B variants",
            "Run paid acquisition test across 2+ channels ($500–2k budget)",
            "Measure signup intent rate and cost-per-lead",
        ],
        success_criteria: "Signup conversion >3% and CPL below industry benchmark.",
        risk_mitigated: "Demand Collapse",
        duration: "2–4 weeks",
        kind: PhaseKind::Conditional,
        base_priority: 3,
        declaration_index: 2,
        icon_key: "chart",
    },
    RoadmapPhase {
        id: PhaseId::Positioning,
        name: "Establish Competitive Positioning",
        objective: "Define defensible value proposition that separates from incumbent solutions.",
        actions: &[
            "Conduct competitive feature-gap analysis across top 5 alternatives",
            "Identify underserved need clusters from interview data",
            "Formulate positioning statement with quantifiable differentiation claim",
        ],
        success_criteria: "Positioning validated by 60%+ target users as clearly distinct.",
        risk_mitigated: "Competitive Saturation",
        duration: "2–3 weeks",
        kind: PhaseKind::Conditional,
        base_priority: 4,
        declaration_index: 3,
        icon_key: "target",
    },
    RoadmapPhase {
        id: PhaseId::MvpBuild,
        name: "Build Minimum Viable Product",
        objective: "Develop functional prototype to test core assumptions with real users.",
        actions: &[
            "Scope MVP to 3–5 critical user flows only",
            "Build with fastest-to-market stack; avoid premature optimization",
            "Deploy to closed beta cohort of 20–50 users",
        ],
        success_criteria: "Beta cohort achieves 40%+ weekly active retention at Day 14.",
        risk_mitigated: "Validation Dependency",
        duration: "4–8 weeks",
        kind: PhaseKind::Mandatory,
        base_priority: 5,
        declaration_index: 4,
        icon_key: "flask",
    },
    RoadmapPhase {
        id: PhaseId::MonetizationTesting,
        name: "Test Monetization Model",
        objective: "Validate willingness-to-pay and establish baseline pricing.",
        actions: &[
            "Design 2–3 pricing tiers with feature differentiation",
            "Run price sensitivity survey (Van Westendorp or Gabor-Granger)",
            "Deploy paywall to subset of active users; measure conversion",
        ],
        success_criteria: "Trial-to-paid conversion >5% or pre-sale commitment from 10+ users.",
        risk_mitigated: "Revenue Model Uncertainty",
        duration: "3–5 weeks",
        kind: PhaseKind::Conditional,
        base_priority: 6,
        declaration_index: 5,
        icon_key: "dollar",
    },
    RoadmapPhase {
        id: PhaseId::TractionValidation,
        name: "Validate Traction Signals",
        objective: "Confirm repeatable acquisition and engagement patterns.",
        actions: &[
            "Initiate small-scale marketing campaign across validated channel",
            "Track cohort retention curves at Day 1, 7, 14, 30",
            "Measure organic referral coefficient and NPS",
        ],
        success_criteria: "Month-over-month growth >15% with stable retention curve.",
        risk_mitigated: "Engagement Depth Constraint",
        duration: "4–6 weeks",
        kind: PhaseKind::Conditional,
        base_priority: 7,
        declaration_index: 6,
        icon_key: "rocket",
    },
    RoadmapPhase {
        id: PhaseId::UnitEconomics,
        name: "Validate Unit Economics",
        objective: "Confirm LTV:CAC ratio supports sustainable growth.",
        actions: &[
            "Calculate blended CAC across all active channels",
            "Project 12-month LTV from current retention and ARPU",
            "Model payback period and contribution margin per cohort",
        ],
        success_criteria: "LTV:CAC ratio >3:1 or clear trajectory toward it within 2 quarters.",
        risk_mitigated: "Capital Dependency",
        duration: "2–4 weeks",
        kind: PhaseKind::Conditional,
        base_priority: 8,
        declaration_index: 7,
        icon_key: "briefcase",
    },
    RoadmapPhase {
        id: PhaseId::ScalabilityAssessment,
        name: "Assess Scalability Architecture",
        objective: "Identify infrastructure constraints before scaling investment.",
        actions: &[
            "Load-test current architecture at 10x projected volume",
            "Audit operational bottlenecks in delivery pipeline",
            "Document scaling dependencies and cost-per-unit at scale",
        ],
        success_criteria: "Architecture supports 10x growth without proportional cost increase.",
        risk_mitigated: "Scalability Ceiling",
        duration: "2–4 weeks",
        kind: PhaseKind::Conditional,
        base_priority: 9,
        declaration_index: 8,
        icon_key: "cpu",
    },
    RoadmapPhase {
        id: PhaseId::GrowthOptimization,
        name: "Optimize Growth Channels",
        objective: "Scale validated channels while maintaining unit economics.",
        actions: &[
            "Double budget on top-performing acquisition channel",
            "Implement systematic A/B framework for funnel optimization",
            "Build referral or virality loop into core product experience",
        ],
        success_criteria: "CAC decreases 20%+ while maintaining acquisition volume growth.",
        risk_mitigated: "Commoditization Trajectory",
        duration: "4–8 weeks",
        kind: PhaseKind::Optional,
        base_priority: 10,
        declaration_index: 9,
        icon_key: "trending",
    },
    RoadmapPhase {
        id: PhaseId::CapitalStrategy,
        name: "Define Capital Strategy",
        objective: "Determine funding approach aligned with validated metrics.",
        actions: &[
            "Model 18-month runway scenarios (bootstrap vs. raise)",
            "Prepare data room with validated metrics and projections",
            "Identify optimal instrument (SAFE, equity, revenue-based)",
        ],
        success_criteria: "Capital plan defined with clear milestone-based deployment schedule.",
        risk_mitigated: "Capital Dependency",
        duration: "2–4 weeks",
        kind: PhaseKind::Optional,
        base_priority: 11,
        declaration_index: 10,
        icon_key: "dollar",
    },
    RoadmapPhase {
        id: PhaseId::PivotAssessment,
        name: "Evaluate Pivot Indicators",
        objective: "Determine if current trajectory warrants strategic redirection.",
        actions: &[
            "Audit all validation metrics against original thresholds",
            "Identify highest-signal adjacent opportunities from user data",
            "Model resource cost of pivot vs. persistence",
        ],
        success_criteria: "Decision framework outputs clear persist/pivot/terminate signal.",
        risk_mitigated: "Validation Dependency",
        duration: "1–2 weeks",
        kind: PhaseKind::Conditional,
        base_priority: 12,
        declaration_index: 11,
        icon_key: "refresh",
    },
];

pub fn phase(id: PhaseId) -> &'static RoadmapPhase {
    // Library order matches PhaseId declaration order; see `library_covers_every_id`.
    &PHASE_LIBRARY[id.index()]
}

// ---------------------------------------------------------------------------
// Stage priority modifiers
// ---------------------------------------------------------------------------

/// Per-stage priority shifts. Negative values pull a phase earlier; phases
/// without an entry for the stage are unshifted.
pub const STAGE_PRIORITY_MODIFIERS: &[(Stage, &[(PhaseId, i32)])] = &[
    (
        Stage::PreValidation,
        &[
            (PhaseId::ProblemValidation, -5),
            (PhaseId::IcpRefinement, -3),
            (PhaseId::DemandVerification, -2),
            (PhaseId::Positioning, -1),
            (PhaseId::MvpBuild, 0),
        ],
    ),
    (
        Stage::Validation,
        &[
            (PhaseId::MvpBuild, -5),
            (PhaseId::MonetizationTesting, -3),
            (PhaseId::TractionValidation, -2),
            (PhaseId::Positioning, -1),
        ],
    ),
    (
        Stage::EarlyTraction,
        &[
            (PhaseId::UnitEconomics, -5),
            (PhaseId::TractionValidation, -4),
            (PhaseId::ScalabilityAssessment, -3),
            (PhaseId::GrowthOptimization, -2),
            (PhaseId::MonetizationTesting, -1),
        ],
    ),
    (
        Stage::Growth,
        &[
            (PhaseId::GrowthOptimization, -5),
            (PhaseId::CapitalStrategy, -4),
            (PhaseId::ScalabilityAssessment, -3),
            (PhaseId::UnitEconomics, -2),
        ],
    ),
];

pub fn stage_modifier(stage: Stage, id: PhaseId) -> i32 {
    STAGE_PRIORITY_MODIFIERS
        .iter()
        .find(|(s, _)| *s == stage)
        .and_then(|(_, mods)| mods.iter().find(|(p, _)| *p == id))
        .map(|(_, delta)| *delta)
        .unwrap_or(0)
}

pub fn effective_priority(stage: Stage, phase: &RoadmapPhase) -> i32 {
    phase.base_priority + stage_modifier(stage, phase.id)
}

/// Resolve a phase by id string; used by command surfaces.
pub fn lookup(id: &str) -> Result<&'static RoadmapPhase> {
    let id: PhaseId = id.parse()?;
    Ok(phase(id))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
