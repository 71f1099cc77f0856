// src/schemes/explicit.rs
//! Explicit Finite-Difference Scheme
//!
//! # Discretization
//!
//! Central differences in spot and a forward step in time, discounted over
//! the step, give the new layer directly from the known one:
//! ```text
//! fⱼ(t) = aⱼ·fⱼ₋₁(t+dt) + bⱼ·fⱼ(t+dt) + cⱼ·fⱼ₊₁(t+dt)
//!
//! aⱼ = (½σ²j² - ½(r-q)j)·dt / (1 + r·dt)
//! bⱼ = (1 - σ²j²·dt)      / (1 + r·dt)
//! cⱼ = (½σ²j² + ½(r-q)j)·dt / (1 + r·dt)
//! ```
//!
//! # Stability
//!
//! - **Conditionally stable**: `bⱼ` turns negative once `σ²j²·dt > 1`, and
//!   errors then grow geometrically from step to step
//! - The engine only warns; it never shrinks `dt` on its own
//! - No linear solve is needed, so a step is the cheapest of the three schemes

use super::scheme::{FdScheme, SchemeOperators};
use crate::fd::grid::Grid;
use crate::linalg::Tridiagonal;
use crate::models::OptionParams;

pub struct ExplicitScheme;

impl ExplicitScheme {
    pub fn new() -> Self {
        ExplicitScheme {}
    }

    /// Discounted forward-Euler stencil
    pub fn stencil(grid: &Grid, params: &OptionParams) -> Tridiagonal {
        let n = grid.nodes();
        let dt = grid.dt;
        let sigma_sq = params.sigma * params.sigma;
        let drift = params.r - params.q;
        let discount = 1.0 / (1.0 + params.r * dt);

        let mut op = Tridiagonal::zeros(n);
        for j in 0..n {
            let jf = j as f64;
            let diffusion = 0.5 * sigma_sq * jf * jf * dt;
            let convection = 0.5 * drift * jf * dt;
            op.lower[j] = discount * (diffusion - convection);
            op.diag[j] = discount * (1.0 - sigma_sq * jf * jf * dt);
            op.upper[j] = discount * (diffusion + convection);
        }
        op
    }

    /// `σ²·n_s²·dt`, the largest diffusion number on the grid
    pub fn diffusion_number(grid: &Grid, params: &OptionParams) -> f64 {
        let n = grid.n_s as f64;
        params.sigma * params.sigma * n * n * grid.dt
    }
}

impl Default for ExplicitScheme {
    fn default() -> Self {
        ExplicitScheme::new()
    }
}

impl FdScheme for ExplicitScheme {
    fn name(&self) -> &'static str {
        "Explicit"
    }

    fn build_operators(&self, grid: &Grid, params: &OptionParams) -> SchemeOperators {
        SchemeOperators {
            implicit: None,
            explicit: Some(Self::stencil(grid, params)),
        }
    }

    fn stability_warning(&self, grid: &Grid, params: &OptionParams) -> Option<String> {
        let number = Self::diffusion_number(grid, params);
        if number > 1.0 {
            Some(format!(
                "σ²·n_s²·dt = {:.3} > 1 (n_s={}, n_t={}); explicit stepping may diverge",
                number, grid.n_s, grid.n_t
            ))
        } else {
            None
        }
    }
}
