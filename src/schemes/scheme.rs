// src/schemes/scheme.rs
use crate::fd::boundary::BoundaryCondition;
use crate::fd::grid::Grid;
use crate::linalg::Tridiagonal;
use crate::models::OptionParams;

/// Operators of one backward step `L·f(t) = R·f(t + dt)`
///
/// `implicit` is `L`, the system solved every step; `explicit` is `R`, applied
/// to the known layer to form the right-hand side. A missing operator stands
/// for the identity.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemeOperators {
    pub implicit: Option<Tridiagonal>,
    pub explicit: Option<Tridiagonal>,
}

/// Time-stepping strategy for the Black-Scholes PDE on a uniform spot grid
pub trait FdScheme: Send + Sync {
    fn name(&self) -> &'static str;

    /// Stencil coefficients for every node `j = 0..=n_s`
    ///
    /// The PDE has constant coefficients in `j` on a uniform grid, so the
    /// operators are built once per solve.
    fn build_operators(&self, grid: &Grid, params: &OptionParams) -> SchemeOperators;

    /// Rewrite the edge rows of every operator for `boundary`
    fn apply_boundary(&self, boundary: BoundaryCondition, ops: &mut SchemeOperators) {
        if let Some(op) = ops.implicit.as_mut() {
            boundary.prepare_operator(op);
        }
        if let Some(op) = ops.explicit.as_mut() {
            boundary.prepare_operator(op);
        }
    }

    /// Reason the scheme may diverge on this grid, if any
    fn stability_warning(&self, _grid: &Grid, _params: &OptionParams) -> Option<String> {
        None
    }
}
