pub mod assess;
pub mod input;
pub mod phases;
pub mod readiness;
pub mod risk;
pub mod roadmap;
