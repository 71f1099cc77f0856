// src/fd/boundary.rs
//! Boundary policies for the first and last spot nodes
//!
//! Every policy acts in two places:
//!
//! 1. **Operator rows**: rows `0` and `n_s` of each scheme operator are
//!    rewritten once per solve, before time stepping starts.
//! 2. **Per-step values**: policies that pin the edges supply the boundary
//!    entries of the right-hand side and overwrite the solved layer.
//!
//! | code  | policy     | rows                       | edge values                       |
//! |-------|------------|----------------------------|-----------------------------------|
//! | `"n"` | Neumann    | ghost node folded in       | come out of the system            |
//! | `"d"` | Dirichlet  | identity                   | analytic limits at `τ = T - t`    |
//! | `"m"` | Discount   | identity                   | previous edge value · `e^(r·dt)`  |
//! | `""`  | Free       | identity                   | previous edge value, unchanged    |
//!
//! The discount and free policies are heuristics without a derivation behind
//! them; they are selectable for comparison runs, not as validated models.

use super::grid::Grid;
use crate::error::{PdeError, PdeResult};
use crate::linalg::Tridiagonal;
use crate::models::{OptionKind, OptionParams};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoundaryCondition {
    /// Zero second derivative at both edges (`"n"`)
    Neumann,
    /// Edge values fixed to the analytic limits (`"d"`)
    Dirichlet,
    /// Edge values carried by pure discounting (`"m"`)
    Discount,
    /// Edge values carried through unchanged (`""`)
    Free,
}

impl BoundaryCondition {
    pub const ALL: [BoundaryCondition; 4] = [
        BoundaryCondition::Neumann,
        BoundaryCondition::Dirichlet,
        BoundaryCondition::Discount,
        BoundaryCondition::Free,
    ];

    /// Short textual code
    pub fn code(&self) -> &'static str {
        match self {
            BoundaryCondition::Neumann => "n",
            BoundaryCondition::Dirichlet => "d",
            BoundaryCondition::Discount => "m",
            BoundaryCondition::Free => "",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BoundaryCondition::Neumann => "Neumann",
            BoundaryCondition::Dirichlet => "Dirichlet",
            BoundaryCondition::Discount => "Discount",
            BoundaryCondition::Free => "Free",
        }
    }

    /// Rewrite rows `0` and `n_s` of a scheme operator
    ///
    /// Neumann substitutes the ghost node `f₋₁ = 2f₀ - f₁` (and its mirror
    /// `fₙ₊₁ = 2fₙ - fₙ₋₁`) into the edge rows:
    /// ```text
    /// b₀ += 2a₀   c₀ -= a₀
    /// bₙ += 2cₙ   aₙ -= cₙ
    /// ```
    /// All other policies replace the edge rows with identity rows.
    pub fn prepare_operator(&self, op: &mut Tridiagonal) {
        let n = match op.size() {
            0 | 1 => return,
            size => size - 1,
        };
        match self {
            BoundaryCondition::Neumann => {
                let a0 = op.lower[0];
                op.diag[0] += 2.0 * a0;
                op.upper[0] -= a0;
                op.lower[0] = 0.0;

                let cn = op.upper[n];
                op.diag[n] += 2.0 * cn;
                op.lower[n] -= cn;
                op.upper[n] = 0.0;
            }
            BoundaryCondition::Dirichlet | BoundaryCondition::Discount | BoundaryCondition::Free => {
                op.set_identity_row(0);
                op.set_identity_row(n);
            }
        }
    }

    /// Edge values `(f₀, fₙ)` of the layer produced by a backward step
    ///
    /// `prev` is the layer the step starts from and `tau` the time to
    /// maturity of the layer being produced. Returns `None` when the edges are
    /// solved for (Neumann).
    pub fn edge_values(&self, ctx: &BoundaryContext, tau: f64, prev: &[f64]) -> Option<(f64, f64)> {
        let n = prev.len().checked_sub(1)?;
        match self {
            BoundaryCondition::Neumann => None,
            BoundaryCondition::Dirichlet => Some(ctx.dirichlet_limits(tau)),
            BoundaryCondition::Discount => {
                let growth = (ctx.r * ctx.dt).exp();
                Some((prev[0] * growth, prev[n] * growth))
            }
            BoundaryCondition::Free => Some((prev[0], prev[n])),
        }
    }
}

impl FromStr for BoundaryCondition {
    type Err = PdeError;

    fn from_str(s: &str) -> PdeResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "n" | "neumann" => Ok(BoundaryCondition::Neumann),
            "d" | "dirichlet" => Ok(BoundaryCondition::Dirichlet),
            "m" | "discount" => Ok(BoundaryCondition::Discount),
            "" | "none" | "free" => Ok(BoundaryCondition::Free),
            other => Err(PdeError::InvalidConfiguration {
                field: "boundary".to_string(),
                reason: format!(
                    "unrecognized boundary condition '{}' (expected \"n\", \"d\", \"m\" or \"\")",
                    other
                ),
            }),
        }
    }
}

impl fmt::Display for BoundaryCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (\"{}\")", self.name(), self.code())
    }
}

/// Market and grid quantities the edge values depend on
#[derive(Clone, Copy, Debug)]
pub struct BoundaryContext {
    pub kind: OptionKind,
    pub strike: f64,
    pub s_max: f64,
    pub r: f64,
    pub q: f64,
    pub dt: f64,
}

impl BoundaryContext {
    pub fn new(params: &OptionParams, grid: &Grid) -> Self {
        BoundaryContext {
            kind: params.kind,
            strike: params.k,
            s_max: grid.s_max,
            r: params.r,
            q: params.q,
            dt: grid.dt,
        }
    }

    /// Analytic limits `(f(0, τ), f(Smax, τ))`
    ///
    /// ```text
    /// call: f(0) = 0,          f(Smax) = Smax·e^(-qτ) - K·e^(-rτ)
    /// put:  f(0) = K·e^(-rτ),  f(Smax) = 0
    /// ```
    /// The call's upper edge is the dividend-adjusted form of the usual
    /// `Smax - K·e^(-rτ)` limit and reduces to it when `q = 0`.
    pub fn dirichlet_limits(&self, tau: f64) -> (f64, f64) {
        let discounted_strike = self.strike * (-self.r * tau).exp();
        match self.kind {
            OptionKind::Call => (0.0, self.s_max * (-self.q * tau).exp() - discounted_strike),
            OptionKind::Put => (discounted_strike, 0.0),
        }
    }
}
