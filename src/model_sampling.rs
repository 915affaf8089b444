use serde::{Serialize, Deserialize};

use crate::schedulers::linspace;

/// This represents how beta ranges from its minimum value to the maximum
/// during training.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum BetaSchedule {
    /// Linear interpolation.
    Linear,
    /// Linear interpolation of the square root of beta.
    ScaledLinear,
    /// Glide cosine schedule
    SquaredcosCapV2,
}

/// Create a beta schedule that discretizes the given alpha_t_bar function, which defines the
/// cumulative product of `(1-beta)` over time from `t = [0,1]`.
pub(crate) fn betas_for_alpha_bar(num_diffusion_timesteps: usize, max_beta: f64) -> Vec<f64> {
    let alpha_bar = |t: f64| f64::cos((t + 0.008) / 1.008 * std::f64::consts::FRAC_PI_2).powi(2);
    let mut betas = Vec::with_capacity(num_diffusion_timesteps);
    for i in 0..num_diffusion_timesteps {
        let t1 = i as f64 / num_diffusion_timesteps as f64;
        let t2 = (i + 1) as f64 / num_diffusion_timesteps as f64;
        betas.push((1.0 - alpha_bar(t2) / alpha_bar(t1)).min(max_beta));
    }
    betas
}

/// The sigma table registered by a diffusion model: one sigma per training
/// timestep, ascending in `t` (index 0 is the least noisy level).
///
/// The table is owned by the model side of the host and read-only here.
#[derive(Debug, Clone)]
pub struct ModelSampling {
    sigmas: Vec<f64>,
}

impl ModelSampling {
    /// Wraps a sigma table supplied by the host.
    pub fn new(sigmas: Vec<f64>) -> Self {
        Self { sigmas }
    }

    /// Builds a reference table from a training beta schedule:
    /// `sigma[t] = sqrt((1 - alphas_cumprod[t]) / alphas_cumprod[t])`.
    pub fn from_betas(
        beta_schedule: BetaSchedule,
        beta_start: f64,
        beta_end: f64,
        train_timesteps: usize,
    ) -> Self {
        let betas = match beta_schedule {
            BetaSchedule::Linear => linspace(beta_start, beta_end, train_timesteps),
            BetaSchedule::ScaledLinear => {
                linspace(beta_start.sqrt(), beta_end.sqrt(), train_timesteps)
                    .into_iter()
                    .map(|b| b * b)
                    .collect()
            }
            BetaSchedule::SquaredcosCapV2 => betas_for_alpha_bar(train_timesteps, 0.999),
        };
        let mut alphas_cumprod = Vec::with_capacity(betas.len());
        for &beta in betas.iter() {
            let alpha = 1.0 - beta;
            alphas_cumprod.push(alpha * *alphas_cumprod.last().unwrap_or(&1f64));
        }
        let sigmas = alphas_cumprod.iter().map(|&a| ((1. - a) / a).sqrt()).collect();
        Self { sigmas }
    }

    pub fn sigmas(&self) -> &[f64] {
        &self.sigmas
    }

    /// Highest valid timestep index into the table.
    pub fn total_timesteps(&self) -> usize {
        self.sigmas.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.sigmas.is_empty()
    }
}

impl Default for ModelSampling {
    /// SD 1.x training schedule.
    fn default() -> Self {
        Self::from_betas(BetaSchedule::ScaledLinear, 0.00085, 0.012, 1000)
    }
}
