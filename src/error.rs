use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The model supplied a sigma table with no entries. Callers must
    /// guarantee a non-empty table.
    #[error("model sigma table is empty")]
    EmptySigmaTable,

    /// `denoise` must lie in `(0, 1]`; the schedule length is divided by it.
    #[error("denoise must be positive, got {0}")]
    InvalidDenoise(f64),
}

pub type Result<T> = std::result::Result<T, Error>;
