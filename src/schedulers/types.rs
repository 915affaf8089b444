use crate::model_sampling::ModelSampling;
use crate::Result;

/// A sigma schedule handler: turns a model's sigma table and a step count
/// into the per-step noise levels for a sampling loop.
///
/// Handlers are stateless and shareable; registries hold them behind `Arc`.
pub trait Scheduler: Send + Sync {
    fn sigmas(&self, model: &ModelSampling, steps: usize) -> Result<Vec<f64>>;
}
