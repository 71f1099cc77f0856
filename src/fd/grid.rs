// src/fd/grid.rs
//! Uniform spot/time grid for the Black-Scholes PDE
//!
//! The spot axis spans `[0, Smax]` with `Smax = 2S`, split into an even number
//! of intervals `n_s`. Even parity puts node `n_s/2` exactly on the current
//! spot, which is where the engine reads the price; no interpolation happens.
//!
//! # Auto-sizing
//!
//! When the node count is not given it is derived from the time step:
//! ```text
//! n_s = ⌊ ln(Smax) / (σ·√(3·T/n_t)) ⌋
//! ```
//! followed by the same parity adjustment as an explicit count.

use crate::error::{validation::*, PdeError, PdeResult};
use crate::models::OptionParams;

/// Requested number of spatial intervals
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridSize {
    /// Use this many intervals (rounded up to even)
    Fixed(usize),
    /// Derive the count from volatility and time step
    Auto,
}

impl Default for GridSize {
    fn default() -> Self {
        GridSize::Fixed(200)
    }
}

impl From<usize> for GridSize {
    fn from(n_s: usize) -> Self {
        GridSize::Fixed(n_s)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grid {
    pub s_max: f64,
    pub n_s: usize,
    pub n_t: usize,
    pub dt: f64,
    pub ds: f64,
    pub maturity: f64,
}

impl Grid {
    /// Resolve the grid for `params`
    ///
    /// # Errors
    /// - `InvalidConfiguration` when `n_t == 0` or the resolved node count is
    ///   below 2
    /// - `InvalidParameters` when auto-sizing sees a non-positive volatility
    ///   or a non-positive spot/maturity
    pub fn build(params: &OptionParams, size: GridSize, n_t: usize) -> PdeResult<Grid> {
        validate_steps(n_t)?;
        validate_positive("s", params.s)?;
        validate_positive("t", params.t)?;

        let s_max = 2.0 * params.s;
        let n_s = match size {
            GridSize::Fixed(n) => n,
            GridSize::Auto => auto_node_count(s_max, params.sigma, params.t, n_t)?,
        };
        let n_s = n_s + n_s % 2;
        validate_nodes(n_s)?;

        Ok(Grid {
            s_max,
            n_s,
            n_t,
            dt: params.t / n_t as f64,
            ds: s_max / n_s as f64,
            maturity: params.t,
        })
    }

    /// Number of value nodes (`n_s + 1`)
    pub fn nodes(&self) -> usize {
        self.n_s + 1
    }

    /// Node index that coincides with the spot price
    pub fn mid_index(&self) -> usize {
        self.n_s / 2
    }

    /// Spot price at node `j`
    #[inline]
    pub fn spot_at(&self, j: usize) -> f64 {
        j as f64 * self.ds
    }

    /// Time to maturity of the layer produced by backward step `step` (0-based)
    #[inline]
    pub fn tau_after(&self, step: usize) -> f64 {
        (step + 1) as f64 * self.dt
    }

    /// Spot coordinates of all nodes
    pub fn spots(&self) -> Vec<f64> {
        (0..self.nodes()).map(|j| self.spot_at(j)).collect()
    }
}

/// Heuristic node count balancing spot resolution against σ and the time step
pub fn auto_node_count(s_max: f64, sigma: f64, t: f64, n_t: usize) -> PdeResult<usize> {
    validate_steps(n_t)?;
    validate_positive("sigma", sigma)?;
    validate_positive("t", t)?;

    let raw = s_max.ln() / (sigma * (3.0 * (t / n_t as f64)).sqrt());
    if !raw.is_finite() || raw < 2.0 {
        return Err(PdeError::InvalidConfiguration {
            field: "n_s".to_string(),
            reason: format!(
                "auto-sizing produced a degenerate grid ({:.3} intervals for Smax={}, σ={}, n_t={})",
                raw, s_max, sigma, n_t
            ),
        });
    }
    Ok(raw.floor() as usize)
}
