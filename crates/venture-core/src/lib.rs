pub mod activation;
pub mod assessment;
pub mod error;
pub mod metrics;
pub mod phases;
pub mod profile;
pub mod readiness;
pub mod risk;
pub mod roadmap;

pub use error::{EngineError, Result};
