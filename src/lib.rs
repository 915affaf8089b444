//! Power-shift sigma schedule generation for diffusion sampling loops.

pub mod error;
pub mod model_sampling;
pub mod registry;
pub mod sampling;
pub mod schedulers;

pub use error::{Error, Result};
