use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("metric '{metric}' out of range: {value} (expected 0-10)")]
    MetricOutOfRange { metric: String, value: f64 },

    #[error("missing metric: {0}")]
    MissingMetric(String),

    #[error("unknown stage '{0}': expected Pre-validation, Validation, Early Traction, or Growth")]
    UnknownStage(String),

    #[error("unknown phase: {0}")]
    UnknownPhase(String),

    #[error("profile not found: {0}")]
    ProfileNotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
