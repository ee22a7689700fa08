use anyhow::Context;
use clap::Args;
use std::path::PathBuf;
use venture_core::metrics::{MetricKey, Metrics, Stage};
use venture_core::profile::IdeaProfile;

// ---------------------------------------------------------------------------
// Shared input flags
// ---------------------------------------------------------------------------

/// Idea input: a profile file, individual metric flags, or both. Flags
/// override values read from the profile.
#[derive(Args, Debug, Default)]
pub struct InputArgs {
    /// Idea profile (YAML or JSON)
    #[arg(long, env = "VENTURE_PROFILE")]
    pub profile: Option<PathBuf>,

    /// Lifecycle stage (pre-validation, validation, early-traction, growth)
    #[arg(long)]
    pub stage: Option<Stage>,

    /// Market Demand score (0-10)
    #[arg(long)]
    pub market_demand: Option<f64>,

    /// Problem Severity score (0-10)
    #[arg(long)]
    pub problem_severity: Option<f64>,

    /// Customer Clarity score (0-10)
    #[arg(long)]
    pub customer_clarity: Option<f64>,

    /// Differentiation score (0-10)
    #[arg(long)]
    pub differentiation: Option<f64>,

    /// Monetization score (0-10)
    #[arg(long)]
    pub monetization: Option<f64>,

    /// Scalability score (0-10)
    #[arg(long)]
    pub scalability: Option<f64>,
}

/// Validated input ready for the engine.
#[derive(Debug)]
pub struct Resolved {
    pub title: Option<String>,
    pub stage: Stage,
    pub metrics: Metrics,
}

impl InputArgs {
    fn flag(&self, key: MetricKey) -> Option<f64> {
        match key {
            MetricKey::MarketDemand => self.market_demand,
            MetricKey::ProblemSeverity => self.problem_severity,
            MetricKey::CustomerClarity => self.customer_clarity,
            MetricKey::Differentiation => self.differentiation,
            MetricKey::Monetization => self.monetization,
            MetricKey::Scalability => self.scalability,
        }
    }

    pub fn resolve(&self) -> anyhow::Result<Resolved> {
        let profile = match &self.profile {
            Some(path) => Some(
                IdeaProfile::load(path)
                    .with_context(|| format!("failed to load profile {}", path.display()))?,
            ),
            None => None,
        };

        let stage = match (self.stage, &profile) {
            (Some(stage), _) => stage,
            (None, Some(p)) => p.stage,
            (None, None) => anyhow::bail!("missing --stage (or --profile)"),
        };

        let metrics = match &profile {
            Some(p) => {
                let mut metrics = p.metrics;
                for &key in MetricKey::all() {
                    if let Some(value) = self.flag(key) {
                        metrics = metrics
                            .with(key, value)
                            .with_context(|| format!("invalid --{}", flag_name(key)))?;
                    }
                }
                metrics
            }
            None => {
                let mut values = [0.0; 6];
                for (slot, &key) in values.iter_mut().zip(MetricKey::all()) {
                    *slot = self.flag(key).with_context(|| {
                        format!("missing --{} (or --profile)", flag_name(key))
                    })?;
                }
                let [md, ps, cc, d, mo, s] = values;
                Metrics::new(md, ps, cc, d, mo, s).context("invalid metrics")?
            }
        };

        tracing::debug!(stage = %stage, from_profile = profile.is_some(), "input resolved");

        Ok(Resolved {
            title: profile.map(|p| p.title),
            stage,
            metrics,
        })
    }
}

fn flag_name(key: MetricKey) -> String {
    key.as_str().replace('_', "-")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
