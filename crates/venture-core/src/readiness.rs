use crate::metrics::{fmt_score, round1, MetricKey, Metrics};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Weights and thresholds
// ---------------------------------------------------------------------------

/// Readiness weights in breakdown order (weight descending, ties in the order
/// listed). Weights sum to 100, so one metric point adds `weight / 10` index
/// points.
pub const READINESS_WEIGHTS: [(MetricKey, u32); 6] = [
    (MetricKey::CustomerClarity, 25),
    (MetricKey::MarketDemand, 20),
    (MetricKey::Differentiation, 15),
    (MetricKey::Monetization, 15),
    (MetricKey::ProblemSeverity, 15),
    (MetricKey::Scalability, 10),
];

pub const CONDITIONAL_THRESHOLD: f64 = 45.0;
pub const EXECUTION_THRESHOLD: f64 = 70.0;

/// A metric at or above this value meets the structural minimum.
pub const METRIC_MINIMUM: f64 = 4.0;
/// Metrics at or above this value are not offered as improvement candidates.
pub const IMPROVEMENT_CEILING: f64 = 9.0;

const MAX_METRICS_BELOW_MINIMUM: usize = 3;
const MIN_WEIGHTED_AVERAGE: f64 = 4.5;


// ---------------------------------------------------------------------------
// ReadinessTier
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessTier {
    NotReady,
    ConditionallyReady,
    ExecutionReady,
}

impl ReadinessTier {
    pub fn as_str(self) -> &'static str {
        match self {
            ReadinessTier::NotReady => "Not Ready",
            ReadinessTier::ConditionallyReady => "Conditionally Ready",
            ReadinessTier::ExecutionReady => "Execution Ready",
        }
    }

    /// Index threshold of the next tier up.
    pub fn next_threshold(self) -> Option<f64> {
        match self {
            ReadinessTier::NotReady => Some(CONDITIONAL_THRESHOLD),
            ReadinessTier::ConditionallyReady => Some(EXECUTION_THRESHOLD),
            ReadinessTier::ExecutionReady => None,
        }
    }

    pub fn allows_roadmap(self) -> bool {
        self != ReadinessTier::NotReady
    }
}

impl fmt::Display for ReadinessTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Output records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricBreakdownRow {
    pub metric: MetricKey,
    pub label: String,
    pub value: f64,
    pub weight: u32,
    pub contribution: f64,
    pub meets_minimum: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImprovementSignal {
    pub metric: MetricKey,
    pub label: String,
    pub current_value: f64,
    pub index_gain_per_point: f64,
    /// Metric points needed in this dimension to reach the next tier's index
    /// threshold. Zero or negative when the tier is held down by a gate
    /// rather than by the index.
    pub points_to_next_tier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessResult {
    pub index: f64,
    pub tier: ReadinessTier,
    pub gate_violations: Vec<String>,
    pub metric_breakdown: Vec<MetricBreakdownRow>,
    pub improvement_signal: Option<ImprovementSignal>,
}

// ---------------------------------------------------------------------------
// Hard-stop gates
// ---------------------------------------------------------------------------

struct HardStop {
    condition: fn(&Metrics) -> bool,
    message: fn(&Metrics) -> String,
}

const HARD_STOPS: &[HardStop] = &[
    HardStop {
        condition: |m| m.customer_clarity() < 3.0,
        message: |m| {
            format!(
                "Customer Clarity ({}) is below the minimum viable threshold of 3.0 — target customer is undefined. All roadmap phases require a defined ICP.",
                fmt_score(m.customer_clarity())
            )
        },
    },
    HardStop {
        condition: |m| m.market_demand() < 2.0,
        message: |m| {
            format!(
                "Market Demand ({}) is below the minimum viable threshold of 2.0 — no market signal present. Execution without demand evidence is structurally unsound.",
                fmt_score(m.market_demand())
            )
        },
    },
    HardStop {
        condition: |m| m.problem_severity() < 2.0,
        message: |m| {
            format!(
                "Problem Severity ({}) is below the minimum viable threshold of 2.0 — no problem foundation. Roadmap intervention logic cannot be constructed.",
                fmt_score(m.problem_severity())
            )
        },
    },
    HardStop {
        condition: |m| m.differentiation() < 2.0 && m.monetization() < 2.0,
        message: |m| {
            format!(
                "Compound terminal weakness: Differentiation ({}) and Monetization ({}) are both critically low. No competitive position and no revenue mechanism — roadmap generation would produce invalid output.",
                fmt_score(m.differentiation()),
                fmt_score(m.monetization())
            )
        },
    },
];

pub fn gate_violations(metrics: &Metrics) -> Vec<String> {
    HARD_STOPS
        .iter()
        .filter(|gate| (gate.condition)(metrics))
        .map(|gate| (gate.message)(metrics))
        .collect()
}

/// Structural minimums: too many weak metrics, or a weak demand/monetization
/// weighted average.
pub fn fails_structural_minimum(metrics: &Metrics) -> bool {
    metrics.count_below(METRIC_MINIMUM) >= MAX_METRICS_BELOW_MINIMUM
        || metrics.weighted_average() < MIN_WEIGHTED_AVERAGE
}

// ---------------------------------------------------------------------------
// Index
// ---------------------------------------------------------------------------

pub fn readiness_index(metrics: &Metrics) -> f64 {
    let raw = READINESS_WEIGHTS
        .iter()
        .fold(0.0, |sum, &(key, weight)| sum + metrics.get(key) * weight as f64);
    round1(raw / 10.0)
}

pub fn metric_breakdown(metrics: &Metrics) -> Vec<MetricBreakdownRow> {
    READINESS_WEIGHTS
        .iter()
        .map(|&(key, weight)| {
            let value = metrics.get(key);
            MetricBreakdownRow {
                metric: key,
                label: key.label().to_string(),
                value,
                weight,
                contribution: round1(value * weight as f64 / 10.0),
                meets_minimum: value >= METRIC_MINIMUM,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Composite
// ---------------------------------------------------------------------------

pub fn compute_readiness(metrics: &Metrics) -> ReadinessResult {
    let index = readiness_index(metrics);
    let gate_violations = gate_violations(metrics);
    let metric_breakdown = metric_breakdown(metrics);

    let tier = if !gate_violations.is_empty()
        || index < CONDITIONAL_THRESHOLD
        || fails_structural_minimum(metrics)
    {
        ReadinessTier::NotReady
    } else if index < EXECUTION_THRESHOLD {
        ReadinessTier::ConditionallyReady
    } else {
        ReadinessTier::ExecutionReady
    };

    let improvement_signal = tier
        .next_threshold()
        .and_then(|threshold| improvement_signal(&metric_breakdown, index, threshold));

    tracing::debug!(
        index,
        tier = %tier,
        gates = gate_violations.len(),
        "readiness computed"
    );

    ReadinessResult {
        index,
        tier,
        gate_violations,
        metric_breakdown,
        improvement_signal,
    }
}

/// Highest-weight metric that still has room to grow. Earlier breakdown rows
/// win ties.
fn improvement_signal(
    breakdown: &[MetricBreakdownRow],
    index: f64,
    threshold: f64,
) -> Option<ImprovementSignal> {
    let points_to_tier = threshold - index;
    let mut best: Option<ImprovementSignal> = None;
    for row in breakdown.iter().filter(|r| r.value < IMPROVEMENT_CEILING) {
        let per_point = row.weight as f64 / 10.0;
        let candidate = ImprovementSignal {
            metric: row.metric,
            label: row.label.clone(),
            current_value: row.value,
            index_gain_per_point: round1(per_point),
            points_to_next_tier: round1(points_to_tier / per_point),
        };
        match &best {
            Some(b) if b.index_gain_per_point >= candidate.index_gain_per_point => {}
            _ => best = Some(candidate),
        }
    }
    best
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
