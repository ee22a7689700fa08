use crate::metrics::{fmt_score, Metrics, Stage};
use crate::phases::PhaseId;
use crate::risk::RiskLevel;

// ---------------------------------------------------------------------------
// ActivationContext
// ---------------------------------------------------------------------------

pub struct ActivationContext<'a> {
    pub metrics: &'a Metrics,
    pub stage: Stage,
    pub risk: RiskLevel,
}

// ---------------------------------------------------------------------------
// ActivationRule
// ---------------------------------------------------------------------------

/// A fn-pointer activation predicate. Returns the human-readable reason when
/// the phase should be included, `None` otherwise. Clauses are checked in
/// order and the first satisfied one supplies the reason.
pub struct ActivationRule {
    pub phase: PhaseId,
    pub evaluate: fn(&ActivationContext) -> Option<String>,
}

// ---------------------------------------------------------------------------
// Condition helpers
// ---------------------------------------------------------------------------

fn in_stage(ctx: &ActivationContext, stages: &[Stage]) -> bool {
    stages.contains(&ctx.stage)
}

fn stage_reason(ctx: &ActivationContext, tail: &str) -> String {
    format!("{} stage — {tail}", ctx.stage)
}

fn metric_reason(label: &str, value: f64, tail: &str) -> String {
    format!("{label} at {} — {tail}", fmt_score(value))
}

// ---------------------------------------------------------------------------
// Rule table (library order)
// ---------------------------------------------------------------------------

pub static ACTIVATION_RULES: [ActivationRule; 12] = [
    ActivationRule {
        phase: PhaseId::ProblemValidation,
        evaluate: |ctx| {
            let ps = ctx.metrics.problem_severity();
            if ps < 6.0 {
                return Some(metric_reason("Problem Severity", ps, "below validation threshold."));
            }
            if ctx.stage == Stage::PreValidation {
                return Some("Pre-validation stage requires problem confirmation.".to_string());
            }
            None
        },
    },
    ActivationRule {
        phase: PhaseId::IcpRefinement,
        evaluate: |ctx| {
            let cc = ctx.metrics.customer_clarity();
            (cc < 6.0).then(|| metric_reason("Customer Clarity", cc, "ICP insufficiently defined."))
        },
    },
    ActivationRule {
        phase: PhaseId::DemandVerification,
        evaluate: |ctx| {
            let md = ctx.metrics.market_demand();
            if md < 7.0 {
                return Some(metric_reason("Market Demand", md, "requires empirical verification."));
            }
            if ctx.stage == Stage::PreValidation && md < 9.0 {
                return Some("Pre-validation stage; demand unconfirmed.".to_string());
            }
            None
        },
    },
    ActivationRule {
        phase: PhaseId::Positioning,
        evaluate: |ctx| {
            let d = ctx.metrics.differentiation();
            (d < 6.0).then(|| metric_reason("Differentiation", d, "competitive positioning weak."))
        },
    },
    ActivationRule {
        phase: PhaseId::MvpBuild,
        evaluate: |ctx| {
            in_stage(ctx, &[Stage::PreValidation, Stage::Validation])
                .then(|| stage_reason(ctx, "functional prototype required."))
        },
    },
    ActivationRule {
        phase: PhaseId::MonetizationTesting,
        evaluate: |ctx| {
            let mo = ctx.metrics.monetization();
            (mo < 6.0).then(|| metric_reason("Monetization", mo, "revenue model unvalidated."))
        },
    },
    ActivationRule {
        phase: PhaseId::TractionValidation,
        evaluate: |ctx| {
            if in_stage(ctx, &[Stage::Validation, Stage::EarlyTraction]) {
                return Some(stage_reason(ctx, "traction signals required."));
            }
            if ctx.metrics.market_demand() >= 7.0 && ctx.metrics.problem_severity() < 6.0 {
                return Some(
                    "High demand with moderate problem — engagement depth unconfirmed.".to_string(),
                );
            }
            None
        },
    },
    ActivationRule {
        phase: PhaseId::UnitEconomics,
        evaluate: |ctx| {
            if in_stage(ctx, &[Stage::EarlyTraction, Stage::Growth]) {
                return Some(stage_reason(ctx, "unit economics must be validated."));
            }
            if ctx.metrics.monetization() >= 6.0 && ctx.metrics.scalability() >= 7.0 {
                return Some(
                    "Monetization and scalability present — economics assessment needed."
                        .to_string(),
                );
            }
            None
        },
    },
    ActivationRule {
        phase: PhaseId::ScalabilityAssessment,
        evaluate: |ctx| {
            let s = ctx.metrics.scalability();
            if s < 6.0 {
                return Some(metric_reason("Scalability", s, "infrastructure constraints likely."));
            }
            if in_stage(ctx, &[Stage::EarlyTraction, Stage::Growth]) {
                return Some(stage_reason(ctx, "scaling readiness assessment required."));
            }
            None
        },
    },
    ActivationRule {
        phase: PhaseId::GrowthOptimization,
        evaluate: |ctx| {
            if ctx.stage == Stage::Growth {
                return Some("Growth stage — channel optimization is primary objective.".to_string());
            }
            if ctx.stage == Stage::EarlyTraction
                && ctx.metrics.market_demand() >= 7.0
                && ctx.metrics.differentiation() >= 6.0
            {
                return Some(
                    "Strong demand with differentiation — growth levers available.".to_string(),
                );
            }
            None
        },
    },
    ActivationRule {
        phase: PhaseId::CapitalStrategy,
        evaluate: |ctx| {
            if ctx.stage == Stage::Growth {
                return Some("Growth stage — capital deployment planning required.".to_string());
            }
            if ctx.risk.is_at_least(RiskLevel::Elevated) {
                return Some(format!("{} risk — capital runway planning critical.", ctx.risk));
            }
            if ctx.metrics.scalability() >= 7.0 && ctx.metrics.monetization() < 5.0 {
                return Some(
                    "Scalable model without monetization — external capital likely needed."
                        .to_string(),
                );
            }
            None
        },
    },
    ActivationRule {
        phase: PhaseId::PivotAssessment,
        evaluate: |ctx| {
            if ctx.risk == RiskLevel::High {
                return Some("High risk profile — pivot evaluation warranted.".to_string());
            }
            if ctx.metrics.differentiation() <= 3.0 && ctx.metrics.market_demand() < 5.0 {
                return Some("Critical weakness in both demand and differentiation.".to_string());
            }
            None
        },
    },
];

pub fn activation_rule(id: PhaseId) -> &'static ActivationRule {
    &ACTIVATION_RULES[id.index()]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MetricKey;
    use crate::phases::PHASE_LIBRARY;

    fn eval(id: PhaseId, metrics: &Metrics, stage: Stage, risk: RiskLevel) -> Option<String> {
        let ctx = ActivationContext {
            metrics,
            stage,
            risk,
        };
        (activation_rule(id).evaluate)(&ctx)
    }

    fn strong() -> Metrics {
        Metrics::uniform(9.0).unwrap()
    }

    #[test]
    fn rules_align_with_library_order() {
        for (rule, phase) in ACTIVATION_RULES.iter().zip(PHASE_LIBRARY.iter()) {
            assert_eq!(rule.phase, phase.id);
        }
        assert_eq!(ACTIVATION_RULES.len(), PHASE_LIBRARY.len());
    }

    #[test]
    fn problem_validation_metric_clause_wins_over_stage() {
        let m = strong().with(MetricKey::ProblemSeverity, 5.5).unwrap();
        assert_eq!(
            eval(PhaseId::ProblemValidation, &m, Stage::PreValidation, RiskLevel::Low).unwrap(),
            "Problem Severity at 5.5 — below validation threshold."
        );
        assert_eq!(
            eval(PhaseId::ProblemValidation, &strong(), Stage::PreValidation, RiskLevel::Low)
                .unwrap(),
            "Pre-validation stage requires problem confirmation."
        );
        assert!(eval(PhaseId::ProblemValidation, &strong(), Stage::Growth, RiskLevel::Low).is_none());
    }

    #[test]
    fn metric_thresholds_are_strict() {
        // Validation has no stage clause for any of these phases.
        for (id, key, tail) in [
            (PhaseId::ProblemValidation, MetricKey::ProblemSeverity, "below validation threshold."),
            (PhaseId::Positioning, MetricKey::Differentiation, "competitive positioning weak."),
            (PhaseId::MonetizationTesting, MetricKey::Monetization, "revenue model unvalidated."),
            (PhaseId::ScalabilityAssessment, MetricKey::Scalability, "infrastructure constraints likely."),
        ] {
            let at = strong().with(key, 6.0).unwrap();
            assert!(eval(id, &at, Stage::Validation, RiskLevel::Low).is_none(), "{id} at 6");
            let below = strong().with(key, 5.9).unwrap();
            assert_eq!(
                eval(id, &below, Stage::Validation, RiskLevel::Low).unwrap(),
                format!("{} at 5.9 — {tail}", key.label())
            );
        }
    }

    #[test]
    fn demand_verification_thresholds() {
        let at_seven = strong().with(MetricKey::MarketDemand, 7.0).unwrap();
        assert!(eval(PhaseId::DemandVerification, &at_seven, Stage::Validation, RiskLevel::Low).is_none());
        let below_seven = strong().with(MetricKey::MarketDemand, 6.9).unwrap();
        assert!(eval(PhaseId::DemandVerification, &below_seven, Stage::Validation, RiskLevel::Low).is_some());

        let at_nine = strong().with(MetricKey::MarketDemand, 9.0).unwrap();
        assert!(eval(PhaseId::DemandVerification, &at_nine, Stage::PreValidation, RiskLevel::Low).is_none());
        let below_nine = strong().with(MetricKey::MarketDemand, 8.9).unwrap();
        assert_eq!(
            eval(PhaseId::DemandVerification, &below_nine, Stage::PreValidation, RiskLevel::Low).unwrap(),
            "Pre-validation stage; demand unconfirmed."
        );
    }

    #[test]
    fn icp_refinement_threshold() {
        let m = strong().with(MetricKey::CustomerClarity, 5.9).unwrap();
        assert_eq!(
            eval(PhaseId::IcpRefinement, &m, Stage::Growth, RiskLevel::Low).unwrap(),
            "Customer Clarity at 5.9 — ICP insufficiently defined."
        );
        let m = strong().with(MetricKey::CustomerClarity, 6.0).unwrap();
        assert!(eval(PhaseId::IcpRefinement, &m, Stage::PreValidation, RiskLevel::Low).is_none());
    }

    #[test]
    fn demand_verification_clauses() {
        let m = strong().with(MetricKey::MarketDemand, 6.0).unwrap();
        assert_eq!(
            eval(PhaseId::DemandVerification, &m, Stage::Growth, RiskLevel::Low).unwrap(),
            "Market Demand at 6 — requires empirical verification."
        );
        let m = strong().with(MetricKey::MarketDemand, 8.5).unwrap();
        assert_eq!(
            eval(PhaseId::DemandVerification, &m, Stage::PreValidation, RiskLevel::Low).unwrap(),
            "Pre-validation stage; demand unconfirmed."
        );
        assert!(eval(PhaseId::DemandVerification, &m, Stage::Validation, RiskLevel::Low).is_none());
        assert!(
            eval(PhaseId::DemandVerification, &strong(), Stage::PreValidation, RiskLevel::Low)
                .is_none()
        );
    }

    #[test]
    fn mvp_build_is_stage_only() {
        assert_eq!(
            eval(PhaseId::MvpBuild, &strong(), Stage::Validation, RiskLevel::Low).unwrap(),
            "Validation stage — functional prototype required."
        );
        assert_eq!(
            eval(PhaseId::MvpBuild, &strong(), Stage::PreValidation, RiskLevel::Low).unwrap(),
            "Pre-validation stage — functional prototype required."
        );
        assert!(eval(PhaseId::MvpBuild, &strong(), Stage::EarlyTraction, RiskLevel::High).is_none());
    }

    #[test]
    fn traction_validation_clauses() {
        assert_eq!(
            eval(PhaseId::TractionValidation, &strong(), Stage::EarlyTraction, RiskLevel::Low)
                .unwrap(),
            "Early Traction stage — traction signals required."
        );
        let m = strong().with(MetricKey::ProblemSeverity, 5.0).unwrap();
        assert_eq!(
            eval(PhaseId::TractionValidation, &m, Stage::Growth, RiskLevel::Low).unwrap(),
            "High demand with moderate problem — engagement depth unconfirmed."
        );
    }

    #[test]
    fn unit_economics_clauses() {
        assert_eq!(
            eval(PhaseId::UnitEconomics, &strong(), Stage::Growth, RiskLevel::Low).unwrap(),
            "Growth stage — unit economics must be validated."
        );
        assert_eq!(
            eval(PhaseId::UnitEconomics, &strong(), Stage::Validation, RiskLevel::Low).unwrap(),
            "Monetization and scalability present — economics assessment needed."
        );
        let m = Metrics::uniform(5.0).unwrap();
        assert!(eval(PhaseId::UnitEconomics, &m, Stage::Validation, RiskLevel::Low).is_none());
    }

    #[test]
    fn scalability_assessment_clauses() {
        let m = strong().with(MetricKey::Scalability, 4.5).unwrap();
        assert_eq!(
            eval(PhaseId::ScalabilityAssessment, &m, Stage::Validation, RiskLevel::Low).unwrap(),
            "Scalability at 4.5 — infrastructure constraints likely."
        );
        assert_eq!(
            eval(PhaseId::ScalabilityAssessment, &strong(), Stage::EarlyTraction, RiskLevel::Low)
                .unwrap(),
            "Early Traction stage — scaling readiness assessment required."
        );
    }

    #[test]
    fn growth_optimization_clauses() {
        assert!(eval(PhaseId::GrowthOptimization, &strong(), Stage::Growth, RiskLevel::Low).is_some());
        assert_eq!(
            eval(PhaseId::GrowthOptimization, &strong(), Stage::EarlyTraction, RiskLevel::Low)
                .unwrap(),
            "Strong demand with differentiation — growth levers available."
        );
        assert!(
            eval(PhaseId::GrowthOptimization, &strong(), Stage::Validation, RiskLevel::Low).is_none()
        );
    }

    #[test]
    fn capital_strategy_reports_risk_level() {
        assert_eq!(
            eval(PhaseId::CapitalStrategy, &strong(), Stage::Validation, RiskLevel::Elevated)
                .unwrap(),
            "Elevated risk — capital runway planning critical."
        );
        assert_eq!(
            eval(PhaseId::CapitalStrategy, &strong(), Stage::Validation, RiskLevel::High).unwrap(),
            "High risk — capital runway planning critical."
        );
        assert!(
            eval(PhaseId::CapitalStrategy, &strong(), Stage::Validation, RiskLevel::Moderate)
                .is_none()
        );
        let m = strong().with(MetricKey::Monetization, 4.0).unwrap();
        assert_eq!(
            eval(PhaseId::CapitalStrategy, &m, Stage::Validation, RiskLevel::Low).unwrap(),
            "Scalable model without monetization — external capital likely needed."
        );
    }

    #[test]
    fn pivot_assessment_clauses() {
        assert!(eval(PhaseId::PivotAssessment, &strong(), Stage::Growth, RiskLevel::High).is_some());
        let m = Metrics::new(4.0, 9.0, 9.0, 3.0, 9.0, 9.0).unwrap();
        assert_eq!(
            eval(PhaseId::PivotAssessment, &m, Stage::Growth, RiskLevel::Elevated).unwrap(),
            "Critical weakness in both demand and differentiation."
        );
        assert!(
            eval(PhaseId::PivotAssessment, &strong(), Stage::Growth, RiskLevel::Elevated).is_none()
        );
    }
}
