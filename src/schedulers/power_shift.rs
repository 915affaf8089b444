use serde::{Serialize, Deserialize};

use crate::model_sampling::ModelSampling;
use crate::{Error, Result};

use super::linspace_exclusive;
use super::types::Scheduler;

/// The configuration for the power-shift scheduler.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PowerShiftSchedulerConfig {
    /// Exponent of the S-curve warp; higher values concentrate sampling
    /// density away from the midpoint of the schedule.
    pub power: f64,
    /// Exponent applied to the normalized positions before the warp, bending
    /// the schedule's midpoint toward one end.
    pub midpoint_shift: f64,
    /// Drop the entry immediately before the trailing zero, jumping straight
    /// from the last retained sigma to 0.
    pub discard_penultimate: bool,
}

impl Default for PowerShiftSchedulerConfig {
    fn default() -> Self {
        Self { power: 2.0, midpoint_shift: 1.0, discard_penultimate: false }
    }
}

/// Re-distributes a model's sigma table over `steps` sampling positions.
///
/// Positions are spaced evenly over `[0, 1)`, warped by `midpoint_shift` and
/// then by the S-curve `(1 - x^power)^power`, scaled to the table's timestep
/// range and rounded half-to-even. Consecutive positions that round to the
/// same timestep index are collapsed to one entry (indices are compared, not
/// sigma values), so the output may be shorter than `steps`. A single `0.0`
/// is always appended; with `discard_penultimate` the entry just before it is
/// removed afterwards.
///
/// Total for every positive `steps` and any finite non-negative shape
/// parameters. `sigma_table` must be non-empty.
///
/// Degenerate but defined: `midpoint_shift = 0` maps every position to 1
/// (IEEE `0^0 = 1`), collapsing the schedule to `[sigma_table[0], 0.0]`;
/// `power = 0` maps every position to the top index instead.
pub fn power_shift_sigmas(
    sigma_table: &[f64],
    steps: usize,
    power: f64,
    midpoint_shift: f64,
    discard_penultimate: bool,
) -> Vec<f64> {
    assert!(!sigma_table.is_empty(), "sigma table must be non-empty");
    let total_timesteps = sigma_table.len() - 1;

    let mut sigs = Vec::with_capacity(steps + 1);
    let mut last_t: Option<usize> = None;
    for x in linspace_exclusive(0.0, 1.0, steps) {
        let x = x.powf(midpoint_shift);
        let t_norm = (1.0 - x.powf(power)).powf(power);
        let t = (t_norm * total_timesteps as f64).round_ties_even() as usize;
        let t_int = t.min(total_timesteps);
        if last_t != Some(t_int) {
            sigs.push(sigma_table[t_int]);
        }
        last_t = Some(t_int);
    }
    sigs.push(0.0);

    if discard_penultimate && sigs.len() >= 2 {
        sigs.remove(sigs.len() - 2);
    }
    sigs
}

/// The power-shift scheduler.
#[derive(Debug, Clone, Default)]
pub struct PowerShiftScheduler {
    pub config: PowerShiftSchedulerConfig,
}

impl PowerShiftScheduler {
    pub fn new(config: PowerShiftSchedulerConfig) -> Self {
        Self { config }
    }
}

impl Scheduler for PowerShiftScheduler {
    fn sigmas(&self, model: &ModelSampling, steps: usize) -> Result<Vec<f64>> {
        if model.is_empty() {
            return Err(Error::EmptySigmaTable);
        }
        Ok(power_shift_sigmas(
            model.sigmas(),
            steps,
            self.config.power,
            self.config.midpoint_shift,
            self.config.discard_penultimate,
        ))
    }
}
