use crate::metrics::{fmt_score, MetricKey, Metrics, Stage};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// RiskLevel
// ---------------------------------------------------------------------------

/// Overall risk classification. Variant order is severity order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    Elevated,
    High,
}

impl RiskLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::Elevated => "Elevated",
            RiskLevel::High => "High",
        }
    }

    pub fn is_at_least(self, other: RiskLevel) -> bool {
        self >= other
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Output records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskDriver {
    pub metric: MetricKey,
    pub label: String,
    /// Term highlighted when the label is rendered.
    pub emphasis: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalWeakness {
    pub metric: MetricKey,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuralConstraint {
    pub label: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAnalysis {
    pub overall_risk: RiskLevel,
    pub primary_drivers: Vec<RiskDriver>,
    pub critical_weaknesses: Vec<CriticalWeakness>,
    pub structural_constraints: Vec<StructuralConstraint>,
}

// ---------------------------------------------------------------------------
// Overall risk level
// ---------------------------------------------------------------------------

/// First matching band wins, evaluated from most to least severe.
pub fn calculate_risk_level(metrics: &Metrics) -> RiskLevel {
    let lowest = metrics.lowest();
    let spread = metrics.spread();
    let below_five = metrics.count_below(5.0);
    let weighted_avg = metrics.weighted_average();

    if lowest <= 2.0 || below_five >= 3 || weighted_avg < 4.0 {
        return RiskLevel::High;
    }
    if lowest <= 3.0 || below_five >= 2 || spread >= 6.0 || weighted_avg < 5.0 {
        return RiskLevel::Elevated;
    }
    if lowest < 5.0 || below_five >= 1 || spread >= 4.0 || weighted_avg < 6.5 {
        return RiskLevel::Moderate;
    }
    RiskLevel::Low
}

// ---------------------------------------------------------------------------
// Risk drivers
// ---------------------------------------------------------------------------

struct DriverRule {
    metric: MetricKey,
    /// Emitted when the metric is below 5.
    label: &'static str,
    emphasis: &'static str,
    /// Emitted in addition when the metric is below 4.
    escalation: Option<(&'static str, &'static str)>,
}

/// Emission order is the order of this table.
const DRIVER_RULES: &[DriverRule] = &[
    DriverRule {
        metric: MetricKey::Differentiation,
        label: "Competitive Saturation Risk",
        emphasis: "Saturation",
        escalation: Some(("Limited Differentiation Risk", "Differentiation")),
    },
    DriverRule {
        metric: MetricKey::Monetization,
        label: "Revenue Model Uncertainty",
        emphasis: "Revenue",
        escalation: Some(("Pricing Resistance Risk", "Resistance")),
    },
    DriverRule {
        metric: MetricKey::MarketDemand,
        label: "Demand Validation Risk",
        emphasis: "Demand",
        escalation: Some(("Market Collapse Exposure", "Collapse")),
    },
    DriverRule {
        metric: MetricKey::ProblemSeverity,
        label: "Weak Problem-Market Fit",
        emphasis: "Problem-Market",
        escalation: None,
    },
    DriverRule {
        metric: MetricKey::CustomerClarity,
        label: "ICP Misalignment Threat",
        emphasis: "Misalignment",
        escalation: Some(("Target Audience Ambiguity", "Ambiguity")),
    },
    DriverRule {
        metric: MetricKey::Scalability,
        label: "Scalability Ceiling Risk",
        emphasis: "Scalability",
        escalation: Some(("Infrastructure Bottleneck Threat", "Bottleneck")),
    },
];

pub fn derive_risk_drivers(metrics: &Metrics) -> Vec<RiskDriver> {
    let mut drivers = Vec::new();
    for rule in DRIVER_RULES {
        let value = metrics.get(rule.metric);
        if value >= 5.0 {
            continue;
        }
        drivers.push(RiskDriver {
            metric: rule.metric,
            label: rule.label.to_string(),
            emphasis: rule.emphasis.to_string(),
        });
        if let Some((label, emphasis)) = rule.escalation {
            if value < 4.0 {
                drivers.push(RiskDriver {
                    metric: rule.metric,
                    label: label.to_string(),
                    emphasis: emphasis.to_string(),
                });
            }
        }
    }
    drivers
}

// ---------------------------------------------------------------------------
// Critical weaknesses
// ---------------------------------------------------------------------------

struct WeaknessRule {
    metric: MetricKey,
    title: fn(f64) -> String,
    description: &'static str,
}

const WEAKNESS_THRESHOLD: f64 = 3.0;

const WEAKNESS_RULES: &[WeaknessRule] = &[
    WeaknessRule {
        metric: MetricKey::MarketDemand,
        title: |v| format!("Demand Collapse ({})", fmt_score(v)),
        description: "Insufficient market pull to sustain acquisition economics at scale.",
    },
    WeaknessRule {
        metric: MetricKey::ProblemSeverity,
        title: |v| format!("Problem Irrelevance ({})", fmt_score(v)),
        description: "Problem severity does not justify switching costs or behavioral change.",
    },
    WeaknessRule {
        metric: MetricKey::CustomerClarity,
        title: |v| format!("ICP Undefined ({})", fmt_score(v)),
        description:
            "Target customer profile lacks specificity required for channel optimization.",
    },
    WeaknessRule {
        metric: MetricKey::Differentiation,
        title: |v| format!("Low Differentiation (<{})", fmt_score(v.ceil())),
        description: "Insufficient unique value proposition to stand out from competitors.",
    },
    WeaknessRule {
        metric: MetricKey::Monetization,
        title: |v| format!("Monetization Failure ({})", fmt_score(v)),
        description: "No validated revenue mechanism; unit economics remain theoretical.",
    },
    WeaknessRule {
        metric: MetricKey::Scalability,
        title: |v| format!("Scalability Ceiling ({})", fmt_score(v)),
        description: "Architecture or model constraints prevent cost-efficient scaling beyond initial traction.",
    },
];

pub fn derive_critical_weaknesses(metrics: &Metrics) -> Vec<CriticalWeakness> {
    WEAKNESS_RULES
        .iter()
        .filter_map(|rule| {
            let value = metrics.get(rule.metric);
            (value <= WEAKNESS_THRESHOLD).then(|| CriticalWeakness {
                metric: rule.metric,
                title: (rule.title)(value),
                description: rule.description.to_string(),
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Structural constraints
// ---------------------------------------------------------------------------

struct ConstraintRule {
    label: &'static str,
    description: &'static str,
    condition: fn(&Metrics, Stage) -> bool,
}

const CONSTRAINT_RULES: &[ConstraintRule] = &[
    ConstraintRule {
        label: "Competitive Density Constraint",
        description:
            "High-demand market with low differentiation creates winner-take-all dynamics.",
        condition: |m, _| m.market_demand() >= 8.0 && m.differentiation() <= 5.0,
    },
    ConstraintRule {
        label: "Capital Dependency Constraint",
        description:
            "Scalable model without monetization validation requires sustained external funding.",
        condition: |m, _| m.scalability() >= 7.0 && m.monetization() < 5.0,
    },
    ConstraintRule {
        label: "Validation Dependency Constraint",
        description: "All projections are pre-validation; data confidence remains below institutional threshold.",
        // The legacy "idea" stage token parses to PreValidation.
        condition: |_, stage| stage == Stage::PreValidation,
    },
    ConstraintRule {
        label: "Go-to-Market Uncertainty",
        description:
            "Unclear ICP combined with unvalidated pricing prevents reliable channel strategy.",
        condition: |m, _| m.customer_clarity() < 5.0 && m.monetization() < 5.0,
    },
    ConstraintRule {
        label: "Engagement Depth Constraint",
        description:
            "Market interest exists but problem lacks urgency; risk of shallow engagement.",
        condition: |m, _| m.market_demand() >= 7.0 && m.problem_severity() < 5.0,
    },
    ConstraintRule {
        label: "Commoditization Trajectory",
        description:
            "Scalable but undifferentiated offering will compress margins under competition.",
        condition: |m, _| m.differentiation() < 5.0 && m.scalability() >= 7.0,
    },
];

pub fn derive_structural_constraints(metrics: &Metrics, stage: Stage) -> Vec<StructuralConstraint> {
    CONSTRAINT_RULES
        .iter()
        .filter(|rule| (rule.condition)(metrics, stage))
        .map(|rule| StructuralConstraint {
            label: rule.label.to_string(),
            description: rule.description.to_string(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Composite
// ---------------------------------------------------------------------------

pub fn analyze_risk(metrics: &Metrics, stage: Stage) -> RiskAnalysis {
    let overall_risk = calculate_risk_level(metrics);
    tracing::debug!(risk = %overall_risk, stage = %stage, "risk level classified");
    RiskAnalysis {
        overall_risk,
        primary_drivers: derive_risk_drivers(metrics),
        critical_weaknesses: derive_critical_weaknesses(metrics),
        structural_constraints: derive_structural_constraints(metrics, stage),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn m(md: f64, ps: f64, cc: f64, d: f64, mo: f64, s: f64) -> Metrics {
        Metrics::new(md, ps, cc, d, mo, s).unwrap()
    }

    fn labels(drivers: &[RiskDriver]) -> Vec<&str> {
        drivers.iter().map(|d| d.label.as_str()).collect()
    }

    #[test]
    fn risk_level_order_is_severity_order() {
        assert!(RiskLevel::Low < RiskLevel::Moderate);
        assert!(RiskLevel::Moderate < RiskLevel::Elevated);
        assert!(RiskLevel::Elevated < RiskLevel::High);
        assert!(RiskLevel::High.is_at_least(RiskLevel::Elevated));
    }

    #[test]
    fn scenario_a_is_moderate() {
        let metrics = m(8.5, 6.0, 6.5, 4.5, 7.0, 7.5);
        assert_eq!(calculate_risk_level(&metrics), RiskLevel::Moderate);

        let drivers = derive_risk_drivers(&metrics);
        assert_eq!(labels(&drivers), vec!["Competitive Saturation Risk"]);
        assert_eq!(drivers[0].emphasis, "Saturation");
        assert!(!labels(&drivers).contains(&"Revenue Model Uncertainty"));
    }

    #[test]
    fn uniform_high_scores_are_low_risk() {
        assert_eq!(calculate_risk_level(&Metrics::uniform(9.0).unwrap()), RiskLevel::Low);
        assert_eq!(calculate_risk_level(&Metrics::uniform(6.5).unwrap()), RiskLevel::Low);
    }

    #[test]
    fn high_band_conditions() {
        // lowest <= 2
        assert_eq!(calculate_risk_level(&m(9.0, 9.0, 2.0, 9.0, 9.0, 9.0)), RiskLevel::High);
        // three metrics below five
        assert_eq!(calculate_risk_level(&m(9.0, 4.9, 4.9, 4.9, 9.0, 9.0)), RiskLevel::High);
        // weighted average below four: uniform 3.9 also trips belowFive, so
        // only the band matters here
        assert_eq!(calculate_risk_level(&Metrics::uniform(3.9).unwrap()), RiskLevel::High);
    }

    #[test]
    fn elevated_band_conditions() {
        // lowest <= 3
        assert_eq!(calculate_risk_level(&m(9.0, 9.0, 3.0, 9.0, 9.0, 9.0)), RiskLevel::Elevated);
        // two metrics below five
        assert_eq!(calculate_risk_level(&m(9.0, 4.5, 4.5, 9.0, 9.0, 9.0)), RiskLevel::Elevated);
        // spread >= 6 with the lowest metric still above 3
        assert_eq!(calculate_risk_level(&m(10.0, 9.0, 3.5, 9.0, 9.0, 9.0)), RiskLevel::Elevated);
    }

    #[test]
    fn elevated_spread_boundary_is_inclusive() {
        // spread exactly 6, lowest 4, one metric below five
        assert_eq!(calculate_risk_level(&m(10.0, 4.0, 10.0, 10.0, 10.0, 10.0)), RiskLevel::Elevated);
        // spread 5.9 falls back to Moderate
        assert_eq!(calculate_risk_level(&m(10.0, 4.1, 10.0, 10.0, 10.0, 10.0)), RiskLevel::Moderate);
    }

    #[test]
    fn elevated_on_weighted_average_alone() {
        // weighted average 34.25 / 7 = 4.89
        assert_eq!(calculate_risk_level(&m(4.5, 5.0, 5.0, 5.0, 5.0, 5.0)), RiskLevel::Elevated);
        // weighted average 34.85 / 7 = 4.98
        assert_eq!(calculate_risk_level(&m(5.0, 5.0, 5.0, 5.0, 4.9, 5.0)), RiskLevel::Elevated);
        // weighted average exactly 5
        assert_eq!(calculate_risk_level(&Metrics::uniform(5.0).unwrap()), RiskLevel::Moderate);
    }

    #[test]
    fn moderate_band_conditions() {
        // spread >= 4 only
        assert_eq!(calculate_risk_level(&m(9.0, 5.0, 9.0, 9.0, 9.0, 9.0)), RiskLevel::Moderate);
        // weighted average below 6.5 only
        assert_eq!(calculate_risk_level(&Metrics::uniform(6.0).unwrap()), RiskLevel::Moderate);
    }

    #[test]
    fn drivers_follow_declaration_order_with_escalations() {
        let metrics = m(3.5, 4.0, 3.0, 2.0, 4.5, 3.9);
        assert_eq!(
            labels(&derive_risk_drivers(&metrics)),
            vec![
                "Competitive Saturation Risk",
                "Limited Differentiation Risk",
                "Revenue Model Uncertainty",
                "Demand Validation Risk",
                "Market Collapse Exposure",
                "Weak Problem-Market Fit",
                "ICP Misalignment Threat",
                "Target Audience Ambiguity",
                "Scalability Ceiling Risk",
                "Infrastructure Bottleneck Threat",
            ]
        );
    }

    #[test]
    fn problem_severity_never_escalates() {
        let metrics = m(9.0, 0.0, 9.0, 9.0, 9.0, 9.0);
        assert_eq!(labels(&derive_risk_drivers(&metrics)), vec!["Weak Problem-Market Fit"]);
    }

    #[test]
    fn no_drivers_at_five() {
        assert!(derive_risk_drivers(&Metrics::uniform(5.0).unwrap()).is_empty());
    }

    #[test]
    fn weaknesses_fire_at_three_or_below() {
        let metrics = m(3.0, 3.1, 2.5, 2.2, 1.0, 0.0);
        let weaknesses = derive_critical_weaknesses(&metrics);
        let titles: Vec<_> = weaknesses.iter().map(|w| w.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Demand Collapse (3)",
                "ICP Undefined (2.5)",
                "Low Differentiation (<3)",
                "Monetization Failure (1)",
                "Scalability Ceiling (0)",
            ]
        );
        assert_eq!(
            weaknesses[0].description,
            "Insufficient market pull to sustain acquisition economics at scale."
        );
    }

    #[test]
    fn constraints_fire_independently_in_declaration_order() {
        let metrics = m(8.0, 4.0, 4.0, 4.0, 4.0, 7.0);
        let constraints = derive_structural_constraints(&metrics, Stage::PreValidation);
        let got: Vec<_> = constraints.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(
            got,
            vec![
                "Competitive Density Constraint",
                "Capital Dependency Constraint",
                "Validation Dependency Constraint",
                "Go-to-Market Uncertainty",
                "Engagement Depth Constraint",
                "Commoditization Trajectory",
            ]
        );
    }

    #[test]
    fn validation_dependency_is_stage_driven() {
        let metrics = Metrics::uniform(9.0).unwrap();
        assert_eq!(derive_structural_constraints(&metrics, Stage::PreValidation).len(), 1);
        for &stage in &[Stage::Validation, Stage::EarlyTraction, Stage::Growth] {
            assert!(derive_structural_constraints(&metrics, stage).is_empty());
        }
    }

    #[test]
    fn competitive_density_boundaries() {
        let fires = |md, d| {
            derive_structural_constraints(&m(md, 9.0, 9.0, d, 9.0, 6.0), Stage::Growth)
                .iter()
                .any(|c| c.label == "Competitive Density Constraint")
        };
        assert!(fires(8.0, 5.0));
        assert!(!fires(7.9, 5.0));
        assert!(!fires(8.0, 5.1));
    }

    #[test]
    fn analysis_is_deterministic() {
        let metrics = m(6.2, 4.4, 7.1, 3.3, 5.9, 8.0);
        let a = analyze_risk(&metrics, Stage::Validation);
        let b = analyze_risk(&metrics, Stage::Validation);
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn raising_a_metric_up_to_the_current_maximum_never_raises_risk() {
        let base = m(6.0, 5.5, 3.5, 6.0, 4.5, 7.0);
        let before = calculate_risk_level(&base);
        let ceiling = base.highest();
        for &key in MetricKey::all() {
            let mut value = base.get(key);
            while value < ceiling {
                value = (value + 0.25).min(ceiling);
                let raised = base.with(key, value).unwrap();
                assert!(
                    calculate_risk_level(&raised) <= before,
                    "raising {key} to {value} increased risk"
                );
            }
        }
    }

    #[test]
    fn widening_the_spread_can_raise_risk() {
        // The spread band is not monotone: lifting the top metric widens it.
        let base = m(9.0, 5.5, 9.0, 9.0, 9.0, 9.0);
        assert_eq!(calculate_risk_level(&base), RiskLevel::Low);
        let raised = base.with(MetricKey::MarketDemand, 10.0).unwrap();
        assert_eq!(calculate_risk_level(&raised), RiskLevel::Moderate);
    }
}
