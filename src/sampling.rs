use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::model_sampling::ModelSampling;
use crate::schedulers::power_shift::{PowerShiftScheduler, PowerShiftSchedulerConfig};
use crate::schedulers::types::Scheduler;
use crate::{Error, Result};

pub const MIN_STEPS: usize = 3;
pub const MAX_STEPS: usize = 1000;
pub const MAX_POWER: f64 = 5.0;
pub const MAX_MIDPOINT_SHIFT: f64 = 5.0;

/// Host-side parameters for one schedule request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SigmaRequest {
    pub steps: usize,
    pub power: f64,
    pub midpoint_shift: f64,
    pub discard_penultimate: bool,
    /// Fraction of the schedule actually applied in this invocation. Below
    /// 1.0 the schedule is generated at `steps / denoise` granularity and
    /// only its tail is returned.
    pub denoise: f64,
}

impl Default for SigmaRequest {
    fn default() -> Self {
        Self {
            steps: 20,
            power: 2.0,
            midpoint_shift: 1.0,
            discard_penultimate: false,
            denoise: 1.0,
        }
    }
}

impl SigmaRequest {
    /// Pins every field to the ranges the host contract promises the core.
    pub fn clamped(self) -> Self {
        Self {
            steps: self.steps.clamp(MIN_STEPS, MAX_STEPS),
            power: self.power.clamp(0.0, MAX_POWER),
            midpoint_shift: self.midpoint_shift.clamp(0.0, MAX_MIDPOINT_SHIFT),
            discard_penultimate: self.discard_penultimate,
            denoise: self.denoise.clamp(0.0, 1.0),
        }
    }
}

/// Runs `scheduler` for `steps` effective steps, widening the schedule when
/// `denoise < 1.0` and keeping only the last `steps + 1` entries. The
/// discarded head belongs to the portion of the schedule already applied
/// before this invocation. Sequences that come back shorter than `steps + 1`
/// (index dedup) are returned unchanged.
pub fn get_sigmas_with(
    scheduler: &dyn Scheduler,
    model: &ModelSampling,
    steps: usize,
    denoise: f64,
) -> Result<Vec<f64>> {
    if denoise <= 0.0 {
        return Err(Error::InvalidDenoise(denoise));
    }
    let total_steps = if denoise < 1.0 {
        (steps as f64 / denoise) as usize
    } else {
        steps
    };
    if total_steps != steps {
        debug!(steps, total_steps, denoise, "widening schedule for partial denoise");
    }
    let mut sigmas = scheduler.sigmas(model, total_steps)?;
    let keep = steps + 1;
    if sigmas.len() > keep {
        sigmas.drain(..sigmas.len() - keep);
    }
    Ok(sigmas)
}

/// Full request path: builds a power-shift handler from the request's shape
/// parameters and applies the denoise length adaptation.
pub fn get_sigmas(model: &ModelSampling, request: &SigmaRequest) -> Result<Vec<f64>> {
    let scheduler = PowerShiftScheduler::new(PowerShiftSchedulerConfig {
        power: request.power,
        midpoint_shift: request.midpoint_shift,
        discard_penultimate: request.discard_penultimate,
    });
    get_sigmas_with(&scheduler, model, request.steps, request.denoise)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedulers::power_shift::power_shift_sigmas;

    fn index_table(len: usize) -> Vec<f64> {
        (0..len).map(|i| i as f64).collect()
    }

    #[test]
    fn test_full_denoise_is_passthrough() {
        let model = ModelSampling::new(index_table(1000));
        let request = SigmaRequest { steps: 20, ..Default::default() };
        let sigmas = get_sigmas(&model, &request).unwrap();
        let direct = power_shift_sigmas(model.sigmas(), 20, 2.0, 1.0, false);
        assert_eq!(sigmas, direct);
    }

    #[test]
    fn test_partial_denoise_keeps_schedule_tail() {
        let model = ModelSampling::new(index_table(1000));
        let request = SigmaRequest { steps: 10, denoise: 0.5, ..Default::default() };
        let sigmas = get_sigmas(&model, &request).unwrap();

        let widened = power_shift_sigmas(model.sigmas(), 20, 2.0, 1.0, false);
        assert_eq!(widened.len(), 21);
        assert_eq!(sigmas, widened[widened.len() - 11..]);
        assert_eq!(*sigmas.last().unwrap(), 0.0);
    }

    #[test]
    fn test_short_sequences_pass_through_unchanged() {
        // two-entry table collapses to [sigma, 0.0] regardless of steps
        let model = ModelSampling::new(vec![7.5, 0.1]);
        let request = SigmaRequest { steps: 10, denoise: 0.5, ..Default::default() };
        let sigmas = get_sigmas(&model, &request).unwrap();
        assert_eq!(sigmas, vec![7.5, 0.0]);
    }

    #[test]
    fn test_denoise_must_be_positive() {
        let model = ModelSampling::new(index_table(100));
        let request = SigmaRequest { denoise: 0.0, ..Default::default() };
        let err = get_sigmas(&model, &request).unwrap_err();
        assert!(matches!(err, Error::InvalidDenoise(_)));
    }

    #[test]
    fn test_empty_table_is_rejected() {
        let model = ModelSampling::new(vec![]);
        let err = get_sigmas(&model, &SigmaRequest::default()).unwrap_err();
        assert!(matches!(err, Error::EmptySigmaTable));
    }

    #[test]
    fn test_clamped_pins_host_ranges() {
        let request = SigmaRequest {
            steps: 2000,
            power: 9.0,
            midpoint_shift: -1.0,
            discard_penultimate: true,
            denoise: 1.5,
        }
        .clamped();
        assert_eq!(request.steps, MAX_STEPS);
        assert_eq!(request.power, MAX_POWER);
        assert_eq!(request.midpoint_shift, 0.0);
        assert!(request.discard_penultimate);
        assert_eq!(request.denoise, 1.0);
        let low = SigmaRequest { steps: 1, ..Default::default() }.clamped();
        assert_eq!(low.steps, MIN_STEPS);
    }
}
