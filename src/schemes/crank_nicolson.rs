// src/schemes/crank_nicolson.rs
//! Crank-Nicolson Scheme
//!
//! # Discretization
//!
//! The spatial operator is averaged between the known and the unknown layer,
//! which gives two stencil families per node:
//! ```text
//! aⱼ·fⱼ₋₁(t) + bⱼ·fⱼ(t) + cⱼ·fⱼ₊₁(t) = a*ⱼ·fⱼ₋₁(t+dt) + b*ⱼ·fⱼ(t+dt) + c*ⱼ·fⱼ₊₁(t+dt)
//!
//! aⱼ = -¼j·dt·(jσ² - (r-q))      a*ⱼ = -aⱼ
//! bⱼ =  1 + ½dt·(j²σ² + r)       b*ⱼ =  1 - ½dt·(j²σ² + r)
//! cⱼ = -¼j·dt·(jσ² + (r-q))      c*ⱼ = -cⱼ
//! ```
//!
//! # Properties
//!
//! - **Second order in time**, unconditionally stable in the von Neumann sense
//! - Non-smooth payoffs can leave small oscillations near the strike for
//!   large `dt`

use super::scheme::{FdScheme, SchemeOperators};
use crate::fd::grid::Grid;
use crate::linalg::Tridiagonal;
use crate::models::OptionParams;

pub struct CrankNicolsonScheme;

impl CrankNicolsonScheme {
    pub fn new() -> Self {
        CrankNicolsonScheme {}
    }

    /// Implicit-side `(a, b, c)` and explicit-side `(a*, b*, c*)` stencils
    pub fn stencils(grid: &Grid, params: &OptionParams) -> (Tridiagonal, Tridiagonal) {
        let n = grid.nodes();
        let dt = grid.dt;
        let sigma_sq = params.sigma * params.sigma;
        let drift = params.r - params.q;

        let mut implicit = Tridiagonal::zeros(n);
        let mut explicit = Tridiagonal::zeros(n);
        for j in 0..n {
            let jf = j as f64;
            let lower = -0.25 * jf * dt * (jf * sigma_sq - drift);
            let upper = -0.25 * jf * dt * (jf * sigma_sq + drift);
            let half_diag = 0.5 * dt * (jf * jf * sigma_sq + params.r);

            implicit.lower[j] = lower;
            implicit.diag[j] = 1.0 + half_diag;
            implicit.upper[j] = upper;

            explicit.lower[j] = -lower;
            explicit.diag[j] = 1.0 - half_diag;
            explicit.upper[j] = -upper;
        }
        (implicit, explicit)
    }
}

impl Default for CrankNicolsonScheme {
    fn default() -> Self {
        CrankNicolsonScheme::new()
    }
}

impl FdScheme for CrankNicolsonScheme {
    fn name(&self) -> &'static str {
        "Crank-Nicolson"
    }

    fn build_operators(&self, grid: &Grid, params: &OptionParams) -> SchemeOperators {
        let (implicit, explicit) = Self::stencils(grid, params);
        SchemeOperators {
            implicit: Some(implicit),
            explicit: Some(explicit),
        }
    }
}
