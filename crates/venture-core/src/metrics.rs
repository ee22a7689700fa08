use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const METRIC_MIN: f64 = 0.0;
pub const METRIC_MAX: f64 = 10.0;

// ---------------------------------------------------------------------------
// MetricKey
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKey {
    MarketDemand,
    ProblemSeverity,
    CustomerClarity,
    Differentiation,
    Monetization,
    Scalability,
}

impl MetricKey {
    /// Declaration order. Every list derived from the metric vector that is
    /// not explicitly re-ordered follows this order.
    pub fn all() -> &'static [MetricKey] {
        &[
            MetricKey::MarketDemand,
            MetricKey::ProblemSeverity,
            MetricKey::CustomerClarity,
            MetricKey::Differentiation,
            MetricKey::Monetization,
            MetricKey::Scalability,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MetricKey::MarketDemand => "market_demand",
            MetricKey::ProblemSeverity => "problem_severity",
            MetricKey::CustomerClarity => "customer_clarity",
            MetricKey::Differentiation => "differentiation",
            MetricKey::Monetization => "monetization",
            MetricKey::Scalability => "scalability",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MetricKey::MarketDemand => "Market Demand",
            MetricKey::ProblemSeverity => "Problem Severity",
            MetricKey::CustomerClarity => "Customer Clarity",
            MetricKey::Differentiation => "Differentiation",
            MetricKey::Monetization => "Monetization",
            MetricKey::Scalability => "Scalability",
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

/// The six normalized quality scores an idea is assessed on.
///
/// A `Metrics` value can only be obtained through [`Metrics::new`] or
/// deserialization, both of which reject values outside `[0, 10]`. Every
/// analyzer in this crate therefore works on in-range input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MetricsInput")]
pub struct Metrics {
    market_demand: f64,
    problem_severity: f64,
    customer_clarity: f64,
    differentiation: f64,
    monetization: f64,
    scalability: f64,
}

impl Metrics {
    pub fn new(
        market_demand: f64,
        problem_severity: f64,
        customer_clarity: f64,
        differentiation: f64,
        monetization: f64,
        scalability: f64,
    ) -> Result<Self> {
        Ok(Self {
            market_demand: checked(MetricKey::MarketDemand, market_demand)?,
            problem_severity: checked(MetricKey::ProblemSeverity, problem_severity)?,
            customer_clarity: checked(MetricKey::CustomerClarity, customer_clarity)?,
            differentiation: checked(MetricKey::Differentiation, differentiation)?,
            monetization: checked(MetricKey::Monetization, monetization)?,
            scalability: checked(MetricKey::Scalability, scalability)?,
        })
    }

    /// All six metrics set to the same value.
    pub fn uniform(value: f64) -> Result<Self> {
        Self::new(value, value, value, value, value, value)
    }

    /// Copy of `self` with one metric replaced.
    pub fn with(&self, key: MetricKey, value: f64) -> Result<Self> {
        let mut next = *self;
        let value = checked(key, value)?;
        match key {
            MetricKey::MarketDemand => next.market_demand = value,
            MetricKey::ProblemSeverity => next.problem_severity = value,
            MetricKey::CustomerClarity => next.customer_clarity = value,
            MetricKey::Differentiation => next.differentiation = value,
            MetricKey::Monetization => next.monetization = value,
            MetricKey::Scalability => next.scalability = value,
        }
        Ok(next)
    }

    pub fn market_demand(&self) -> f64 {
        self.market_demand
    }

    pub fn problem_severity(&self) -> f64 {
        self.problem_severity
    }

    pub fn customer_clarity(&self) -> f64 {
        self.customer_clarity
    }

    pub fn differentiation(&self) -> f64 {
        self.differentiation
    }

    pub fn monetization(&self) -> f64 {
        self.monetization
    }

    pub fn scalability(&self) -> f64 {
        self.scalability
    }

    pub fn get(&self, key: MetricKey) -> f64 {
        match key {
            MetricKey::MarketDemand => self.market_demand,
            MetricKey::ProblemSeverity => self.problem_severity,
            MetricKey::CustomerClarity => self.customer_clarity,
            MetricKey::Differentiation => self.differentiation,
            MetricKey::Monetization => self.monetization,
            MetricKey::Scalability => self.scalability,
        }
    }

    /// Values in declaration order.
    pub fn values(&self) -> [f64; 6] {
        [
            self.market_demand,
            self.problem_severity,
            self.customer_clarity,
            self.differentiation,
            self.monetization,
            self.scalability,
        ]
    }

    pub fn lowest(&self) -> f64 {
        self.values().into_iter().fold(f64::INFINITY, f64::min)
    }

    pub fn highest(&self) -> f64 {
        self.values().into_iter().fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn spread(&self) -> f64 {
        self.highest() - self.lowest()
    }

    pub fn count_below(&self, threshold: f64) -> usize {
        self.values().iter().filter(|&&v| v < threshold).count()
    }

    /// Mean with market demand and monetization weighted 1.5x, the other four
    /// 1x, divided by the weight total of 7.
    pub fn weighted_average(&self) -> f64 {
        let weighted_sum = self.market_demand * 1.5
            + self.problem_severity
            + self.customer_clarity
            + self.differentiation
            + self.monetization * 1.5
            + self.scalability;
        weighted_sum / 7.0
    }
}

fn checked(key: MetricKey, value: f64) -> Result<f64> {
    if !value.is_finite() || !(METRIC_MIN..=METRIC_MAX).contains(&value) {
        return Err(EngineError::MetricOutOfRange {
            metric: key.as_str().to_string(),
            value,
        });
    }
    // Normalizes -0.0 so it renders as "0" in generated text.
    Ok(value + 0.0)
}

/// Unvalidated wire shape. Accepts both snake_case and the scoring service's
/// camelCase field names.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MetricsInput {
    #[serde(alias = "marketDemand")]
    market_demand: Option<f64>,
    #[serde(alias = "problemSeverity")]
    problem_severity: Option<f64>,
    #[serde(alias = "customerClarity")]
    customer_clarity: Option<f64>,
    differentiation: Option<f64>,
    monetization: Option<f64>,
    scalability: Option<f64>,
}

impl TryFrom<MetricsInput> for Metrics {
    type Error = EngineError;

    fn try_from(input: MetricsInput) -> Result<Self> {
        let require = |key: MetricKey, v: Option<f64>| {
            v.ok_or_else(|| EngineError::MissingMetric(key.as_str().to_string()))
        };
        Metrics::new(
            require(MetricKey::MarketDemand, input.market_demand)?,
            require(MetricKey::ProblemSeverity, input.problem_severity)?,
            require(MetricKey::CustomerClarity, input.customer_clarity)?,
            require(MetricKey::Differentiation, input.differentiation)?,
            require(MetricKey::Monetization, input.monetization)?,
            require(MetricKey::Scalability, input.scalability)?,
        )
    }
}

// ---------------------------------------------------------------------------
// Stage
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum Stage {
    PreValidation,
    Validation,
    EarlyTraction,
    Growth,
}

impl Stage {
    pub fn all() -> &'static [Stage] {
        &[
            Stage::PreValidation,
            Stage::Validation,
            Stage::EarlyTraction,
            Stage::Growth,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::PreValidation => "Pre-validation",
            Stage::Validation => "Validation",
            Stage::EarlyTraction => "Early Traction",
            Stage::Growth => "Growth",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Stage {
    type Err = EngineError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            // "idea" is the lifecycle token the scoring service reports before validation.
            "pre-validation" | "prevalidation" | "idea" => Ok(Stage::PreValidation),
            "validation" => Ok(Stage::Validation),
            "early-traction" => Ok(Stage::EarlyTraction),
            "growth" => Ok(Stage::Growth),
            _ => Err(EngineError::UnknownStage(s.to_string())),
        }
    }
}

impl TryFrom<String> for Stage {
    type Error = EngineError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

// ---------------------------------------------------------------------------
// Numeric helpers
// ---------------------------------------------------------------------------

/// Round to one decimal place, ties toward positive infinity.
pub fn round1(value: f64) -> f64 {
    round_half_up(value * 10.0) / 10.0
}

fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Number rendering used inside generated text: shortest decimal (`6`, `4.5`),
/// switching to exponent form below 1e-6 (`1e-7`) as JavaScript's
/// `Number#toString` does.
pub fn fmt_score(value: f64) -> String {
    if value != 0.0 && value.abs() < 1e-6 {
        format!("{value:e}")
    } else {
        format!("{value}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
