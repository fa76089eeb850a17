mod config;
mod def;
pub mod kmaps;
pub mod weights;

pub use config::EvaluatorConfig;
pub use def::{Metric, MetricResult, SideScores};
pub use kmaps::{compute_kmaps, Evaluator};
