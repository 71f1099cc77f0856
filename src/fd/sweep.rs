// src/fd/sweep.rs
//! Convergence sweeps over grid resolution
//!
//! A sweep prices the same option on every `(n_s, n_t)` pair of a rectangular
//! design, once per selected scheme, and returns one surface per scheme. In
//! difference mode each cell holds `price - analytic`, which is how the
//! convergence of the three schemes is usually inspected.
//!
//! Cells are independent solves, each with its own [`TimeStepper`] arena, and
//! are spread over a dedicated rayon pool.
//!
//! [`TimeStepper`]: super::engine::TimeStepper

use super::boundary::BoundaryCondition;
use super::engine::{fd_price_option, FdConfig};
use super::grid::GridSize;
use crate::analytics::bs_analytic::bs_price;
use crate::error::{validation::*, PdeError, PdeResult};
use crate::models::OptionParams;
use crate::schemes::Scheme;
use bitflags::bitflags;
use ndarray::Array2;
use rayon::prelude::*;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SchemeSet: u32 {
        const NONE           = 0;
        const EXPLICIT       = 1 << 0;
        const IMPLICIT       = 1 << 1;
        const CRANK_NICOLSON = 1 << 2;
    }
}

impl SchemeSet {
    /// Selected schemes in a fixed order
    pub fn schemes(&self) -> Vec<Scheme> {
        Scheme::ALL
            .iter()
            .copied()
            .filter(|scheme| self.contains(SchemeSet::from(*scheme)))
            .collect()
    }
}

impl From<Scheme> for SchemeSet {
    fn from(scheme: Scheme) -> Self {
        match scheme {
            Scheme::Explicit => SchemeSet::EXPLICIT,
            Scheme::Implicit => SchemeSet::IMPLICIT,
            Scheme::CrankNicolson => SchemeSet::CRANK_NICOLSON,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SweepConfig {
    pub node_counts: Vec<usize>,
    pub time_steps: Vec<usize>,
    pub schemes: SchemeSet,
    pub boundary: BoundaryCondition,
    pub difference: bool,       // Report price - analytic instead of price
    pub threads: Option<usize>, // Worker threads (default: all cores)
}

impl SweepConfig {
    /// Validate the sweep design
    pub fn validate(&self) -> PdeResult<()> {
        if self.node_counts.is_empty() || self.time_steps.is_empty() {
            return Err(PdeError::InvalidConfiguration {
                field: "sweep".to_string(),
                reason: "node_counts and time_steps must both be non-empty".to_string(),
            });
        }
        if self.schemes.is_empty() {
            return Err(PdeError::InvalidConfiguration {
                field: "schemes".to_string(),
                reason: "select at least one scheme".to_string(),
            });
        }
        if self.threads == Some(0) {
            return Err(PdeError::InvalidConfiguration {
                field: "threads".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }
        for &n_s in &self.node_counts {
            validate_nodes(n_s + n_s % 2)?;
        }
        for &n_t in &self.time_steps {
            validate_steps(n_t)?;
        }
        Ok(())
    }

    /// Inclusive integer ranges, as used for error surfaces
    pub fn from_ranges(
        ns_min: usize,
        ns_max: usize,
        nt_min: usize,
        nt_max: usize,
        boundary: BoundaryCondition,
    ) -> Self {
        SweepConfig {
            node_counts: (ns_min..=ns_max).collect(),
            time_steps: (nt_min..=nt_max).collect(),
            boundary,
            ..Default::default()
        }
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        SweepConfig {
            node_counts: vec![50, 100, 200],
            time_steps: vec![50, 100, 200],
            schemes: SchemeSet::IMPLICIT | SchemeSet::CRANK_NICOLSON,
            boundary: BoundaryCondition::Dirichlet,
            difference: true,
            threads: None,
        }
    }
}

/// One scheme's results: `values[[i, j]]` belongs to
/// `(node_counts[i], time_steps[j])`
#[derive(Clone, Debug)]
pub struct SweepSurface {
    pub scheme: Scheme,
    pub boundary: BoundaryCondition,
    pub difference: bool,
    pub node_counts: Vec<usize>,
    pub time_steps: Vec<usize>,
    pub values: Array2<f64>,
}

impl SweepSurface {
    /// Cell with the smallest absolute value and its `(n_s, n_t)`
    pub fn best(&self) -> Option<(usize, usize, f64)> {
        self.values
            .indexed_iter()
            .filter(|(_, v)| v.is_finite())
            .min_by(|(_, a), (_, b)| a.abs().total_cmp(&b.abs()))
            .map(|((i, j), v)| (self.node_counts[i], self.time_steps[j], *v))
    }
}

/// Price the option on every grid of the sweep design
///
/// # Errors
///
/// Configuration errors are reported before any solve starts; the first
/// failing cell aborts the sweep.
pub fn convergence_sweep(params: &OptionParams, cfg: &SweepConfig) -> PdeResult<Vec<SweepSurface>> {
    params.validate()?;
    cfg.validate()?;

    let threads = cfg.threads.unwrap_or_else(num_cpus::get);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| PdeError::InvalidConfiguration {
            field: "threads".to_string(),
            reason: e.to_string(),
        })?;

    let reference = if cfg.difference { bs_price(params) } else { 0.0 };
    let rows = cfg.node_counts.len();
    let cols = cfg.time_steps.len();

    cfg.schemes
        .schemes()
        .into_iter()
        .map(|scheme| -> PdeResult<SweepSurface> {
            let cells: Vec<f64> = pool.install(|| {
                (0..rows * cols)
                    .into_par_iter()
                    .map(|cell| {
                        let config = FdConfig {
                            grid: GridSize::Fixed(cfg.node_counts[cell / cols]),
                            time_steps: cfg.time_steps[cell % cols],
                            scheme,
                            boundary: cfg.boundary,
                            quiet: true,
                        };
                        fd_price_option(params, &config).map(|s| s.price - reference)
                    })
                    .collect::<PdeResult<Vec<f64>>>()
            })?;

            let values = Array2::from_shape_vec((rows, cols), cells).map_err(|e| {
                PdeError::InvalidConfiguration {
                    field: "sweep".to_string(),
                    reason: e.to_string(),
                }
            })?;

            Ok(SweepSurface {
                scheme,
                boundary: cfg.boundary,
                difference: cfg.difference,
                node_counts: cfg.node_counts.clone(),
                time_steps: cfg.time_steps.clone(),
                values,
            })
        })
        .collect()
}
