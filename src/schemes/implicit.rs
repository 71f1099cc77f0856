// src/schemes/implicit.rs
//! Fully Implicit Finite-Difference Scheme
//!
//! # Discretization
//!
//! Central differences in spot evaluated at the unknown layer:
//! ```text
//! aⱼ·fⱼ₋₁(t) + bⱼ·fⱼ(t) + cⱼ·fⱼ₊₁(t) = fⱼ(t+dt)
//!
//! aⱼ =  ½dt·((r-q)j - σ²j²)
//! bⱼ =  1 + σ²j²·dt + r·dt
//! cⱼ = -½dt·((r-q)j + σ²j²)
//! ```
//!
//! # Properties
//!
//! - **Unconditionally stable**, first order in `dt`
//! - One Thomas solve per step against the previous layer, with no blending

use super::scheme::{FdScheme, SchemeOperators};
use crate::fd::grid::Grid;
use crate::linalg::Tridiagonal;
use crate::models::OptionParams;

pub struct ImplicitScheme;

impl ImplicitScheme {
    pub fn new() -> Self {
        ImplicitScheme {}
    }

    /// Backward-Euler system matrix
    pub fn stencil(grid: &Grid, params: &OptionParams) -> Tridiagonal {
        let n = grid.nodes();
        let dt = grid.dt;
        let sigma_sq = params.sigma * params.sigma;
        let drift = params.r - params.q;

        let mut op = Tridiagonal::zeros(n);
        for j in 0..n {
            let jf = j as f64;
            op.lower[j] = 0.5 * dt * (drift * jf - sigma_sq * jf * jf);
            op.diag[j] = 1.0 + sigma_sq * jf * jf * dt + params.r * dt;
            op.upper[j] = 0.5 * dt * (-drift * jf - sigma_sq * jf * jf);
        }
        op
    }
}

impl Default for ImplicitScheme {
    fn default() -> Self {
        ImplicitScheme::new()
    }
}

impl FdScheme for ImplicitScheme {
    fn name(&self) -> &'static str {
        "Implicit"
    }

    fn build_operators(&self, grid: &Grid, params: &OptionParams) -> SchemeOperators {
        SchemeOperators {
            implicit: Some(Self::stencil(grid, params)),
            explicit: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fd::grid::GridSize;

    #[test]
    fn interior_rows_are_diagonally_dominant() {
        let params = OptionParams::default();
        let grid = Grid::build(&params, GridSize::Fixed(100), 50).unwrap();
        let op = ImplicitScheme::stencil(&grid, &params);
        for j in 1..grid.n_s {
            assert!(op.diag[j].abs() > op.lower[j].abs() + op.upper[j].abs());
        }
    }

    #[test]
    fn row_sums_carry_the_rate_term() {
        let params = OptionParams::default();
        let grid = Grid::build(&params, GridSize::Fixed(30), 40).unwrap();
        let op = ImplicitScheme::stencil(&grid, &params);
        for j in 0..grid.nodes() {
            let row_sum = op.lower[j] + op.diag[j] + op.upper[j];
            assert!((row_sum - (1.0 + params.r * grid.dt)).abs() < 1e-12);
        }
    }
}
