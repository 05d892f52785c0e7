//! Error types for armature-kin.

use armature_model::ModelError;
use thiserror::Error;

/// Per-query kinematics errors. Numerical failures are surfaced to the
/// caller, never retried or approximated away.
#[derive(Debug, Error)]
pub enum KinError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("numerical singularity: {0}")]
    NumericalSingularity(&'static str),

    #[error("no convergence after {iterations} iterations (residual {residual:.3e})")]
    NoConvergence { iterations: usize, residual: f64 },
}

pub type Result<T> = std::result::Result<T, KinError>;
