use std::fs;

use self::{power_shift::{PowerShiftSchedulerConfig, PowerShiftScheduler}, types::Scheduler};
use serde::{Serialize, Deserialize};

pub mod power_shift;
pub mod types;

/// Evenly spaced values over `[start, stop]`, endpoint included.
pub fn linspace(start: f64, stop: f64, steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let delta = (stop - start) / (steps - 1) as f64;
            (0..steps).map(|i| start + delta * i as f64).collect()
        }
    }
}

/// Evenly spaced values over `[start, stop)`, endpoint excluded, mimicking
/// np.linspace(endpoint=False).
pub fn linspace_exclusive(start: f64, stop: f64, steps: usize) -> Vec<f64> {
    if steps == 0 {
        return Vec::new();
    }
    let delta = (stop - start) / steps as f64;
    (0..steps).map(|i| start + delta * i as f64).collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "scheduler_name", content = "scheduler_args")]
pub enum SchedulerKind {
    PowerShiftScheduler(PowerShiftSchedulerConfig),
}

impl SchedulerKind {

    pub fn from_file<T: AsRef<std::path::Path>>(path: T) -> anyhow::Result<Self> {
        let file = fs::read_to_string(path)?;
        let cfg: SchedulerKind = toml::from_str(&file)?;
        Ok(cfg)
    }

    pub fn build(&self) -> Box<dyn Scheduler> {
        match &self {
            SchedulerKind::PowerShiftScheduler(config) => {
                Box::new(PowerShiftScheduler::new(*config))
            },
        }
    }
}
