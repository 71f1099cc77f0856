// src/error.rs
use std::fmt;

/// Error types for the fast-pde engine
#[derive(Debug, Clone, PartialEq)]
pub enum PdeError {
    /// Invalid parameter values (spot, strike, maturity, volatility, ...)
    InvalidParameters {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// Option kind other than call or put
    InvalidOptionKind { kind: String },

    /// Invalid configuration (boundary code, scheme, grid sizing, sweep setup)
    InvalidConfiguration { field: String, reason: String },

    /// Zero pivot during Thomas elimination
    SingularSystem { row: usize, step: Option<usize> },

    /// Non-finite or otherwise unusable numerical result
    NumericalInstability { method: String, reason: String },
}

impl PdeError {
    /// Attach the backward time step at which a singular system was hit.
    pub fn at_step(self, step: usize) -> Self {
        match self {
            PdeError::SingularSystem { row, .. } => PdeError::SingularSystem {
                row,
                step: Some(step),
            },
            other => other,
        }
    }
}

impl fmt::Display for PdeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PdeError::InvalidParameters {
                parameter,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid parameter '{}' = {}: {}",
                    parameter, value, constraint
                )
            }
            PdeError::InvalidOptionKind { kind } => {
                write!(f, "Invalid option kind '{}': expected 'call' or 'put'", kind)
            }
            PdeError::InvalidConfiguration { field, reason } => {
                write!(f, "Invalid configuration for '{}': {}", field, reason)
            }
            PdeError::SingularSystem { row, step } => match step {
                Some(step) => write!(
                    f,
                    "Singular tridiagonal system: zero pivot at row {} (time step {})",
                    row, step
                ),
                None => write!(f, "Singular tridiagonal system: zero pivot at row {}", row),
            },
            PdeError::NumericalInstability { method, reason } => {
                write!(f, "Numerical instability in {}: {}", method, reason)
            }
        }
    }
}

impl std::error::Error for PdeError {}

/// Result type alias for fast-pde operations
pub type PdeResult<T> = Result<T, PdeError>;

/// Validation utilities
pub mod validation {
    use super::{PdeError, PdeResult};

    /// Upper bound on spatial intervals of a single solve
    pub const MAX_GRID_POINTS: usize = 1_000_000;

    /// Validate that a parameter is positive
    pub fn validate_positive(name: &str, value: f64) -> PdeResult<()> {
        if value.is_nan() || value <= 0.0 {
            Err(PdeError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be positive (> 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> PdeResult<()> {
        if !value.is_finite() {
            Err(PdeError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be finite (not NaN or infinite)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate a time-step count
    pub fn validate_steps(steps: usize) -> PdeResult<()> {
        if steps == 0 {
            Err(PdeError::InvalidConfiguration {
                field: "time_steps".to_string(),
                reason: "must be greater than 0".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate a resolved spatial node count
    pub fn validate_nodes(nodes: usize) -> PdeResult<()> {
        if nodes < 2 {
            Err(PdeError::InvalidConfiguration {
                field: "n_s".to_string(),
                reason: format!("grid needs at least 2 spatial intervals, got {}", nodes),
            })
        } else if nodes > MAX_GRID_POINTS {
            Err(PdeError::InvalidConfiguration {
                field: "n_s".to_string(),
                reason: format!("exceeds maximum allowed ({})", MAX_GRID_POINTS),
            })
        } else {
            Ok(())
        }
    }
}
