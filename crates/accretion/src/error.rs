use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by the simulation core.
///
/// Configuration problems are fatal at setup. Numeric instability is
/// per-step: the step is rejected as a whole and the committed state stays
/// untouched, so the caller can adjust parameters and retry, or stop.
#[derive(Debug, Error)]
pub enum Error {
    /// Rejected configuration or initial state: non-positive timestep,
    /// inverted or non-positive bounds, impossible body placement.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A step produced a non-finite position or velocity despite the
    /// distance and velocity clamps. Nothing was committed.
    #[error("numeric instability at step {step}: {detail}")]
    NumericInstability { step: u64, detail: String },
}
