// src/linalg/tridiagonal.rs
//! Tridiagonal operators and the Thomas algorithm
//!
//! # Storage
//!
//! A system of size `n` is held as three bands of length `n`:
//! ```text
//! | b₀ c₀                |
//! | a₁ b₁ c₁             |
//! |    a₂ b₂ c₂          |
//! |       ...            |
//! |          aₙ₋₁ bₙ₋₁   |
//! ```
//! `a₀` and `cₙ₋₁` lie outside the matrix and are ignored. Keeping them in the
//! bands lets the stencil builders write one triple per grid node.
//!
//! # Algorithm
//!
//! One forward elimination pass computes the modified super-diagonal
//! `γⱼ = cⱼ₋₁ / βⱼ₋₁` and pivot `βⱼ = bⱼ - aⱼγⱼ`, scaling the right-hand side
//! as it goes; one backward pass substitutes. Both passes are `O(n)`. The
//! algorithm has no pivoting: an exactly zero `βⱼ` is reported as
//! [`PdeError::SingularSystem`]. Strictly diagonally dominant systems never
//! produce one.

use crate::error::{PdeError, PdeResult};
use nalgebra::{DMatrix, DVector};

/// Banded storage of a tridiagonal matrix
#[derive(Debug, Clone, PartialEq)]
pub struct Tridiagonal {
    /// Sub-diagonal `a` (index 0 unused)
    pub lower: Vec<f64>,
    /// Main diagonal `b`
    pub diag: Vec<f64>,
    /// Super-diagonal `c` (last index unused)
    pub upper: Vec<f64>,
}

impl Tridiagonal {
    /// Zero operator of size `n`
    pub fn zeros(n: usize) -> Self {
        Tridiagonal {
            lower: vec![0.0; n],
            diag: vec![0.0; n],
            upper: vec![0.0; n],
        }
    }

    /// Identity operator of size `n`
    pub fn identity(n: usize) -> Self {
        Tridiagonal {
            lower: vec![0.0; n],
            diag: vec![1.0; n],
            upper: vec![0.0; n],
        }
    }

    /// Build from explicit bands, checking that their lengths agree
    pub fn from_bands(lower: Vec<f64>, diag: Vec<f64>, upper: Vec<f64>) -> PdeResult<Self> {
        if lower.len() != diag.len() || upper.len() != diag.len() {
            return Err(PdeError::InvalidConfiguration {
                field: "tridiagonal".to_string(),
                reason: format!(
                    "band lengths must match (lower={}, diag={}, upper={})",
                    lower.len(),
                    diag.len(),
                    upper.len()
                ),
            });
        }
        Ok(Tridiagonal { lower, diag, upper })
    }

    /// Number of rows (and columns)
    pub fn size(&self) -> usize {
        self.diag.len()
    }

    /// Turn row `i` into an identity row
    pub fn set_identity_row(&mut self, i: usize) {
        self.lower[i] = 0.0;
        self.diag[i] = 1.0;
        self.upper[i] = 0.0;
    }

    /// Compute `out = A·x` without allocating
    pub fn apply_into(&self, x: &[f64], out: &mut [f64]) -> PdeResult<()> {
        let n = self.size();
        if x.len() != n || out.len() != n {
            return Err(length_mismatch(n, x.len(), out.len()));
        }
        match n {
            0 => {}
            1 => out[0] = self.diag[0] * x[0],
            _ => {
                out[0] = self.diag[0] * x[0] + self.upper[0] * x[1];
                for i in 1..n - 1 {
                    out[i] = self.lower[i] * x[i - 1]
                        + self.diag[i] * x[i]
                        + self.upper[i] * x[i + 1];
                }
                out[n - 1] = self.lower[n - 1] * x[n - 2] + self.diag[n - 1] * x[n - 1];
            }
        }
        Ok(())
    }

    /// Matrix-vector product `A·x`
    pub fn apply(&self, x: &[f64]) -> PdeResult<Vec<f64>> {
        let mut out = vec![0.0; self.size()];
        self.apply_into(x, &mut out)?;
        Ok(out)
    }

    /// Solve `A·x = rhs` with the Thomas algorithm
    pub fn solve(&self, rhs: &[f64]) -> PdeResult<Vec<f64>> {
        solve_tridiagonal(&self.lower, &self.diag, &self.upper, rhs)
    }

    /// Solve `A·x = rhs` into `out`, using `gamma` as elimination scratch
    pub fn solve_into(&self, rhs: &[f64], gamma: &mut [f64], out: &mut [f64]) -> PdeResult<()> {
        thomas_solve_into(&self.lower, &self.diag, &self.upper, rhs, gamma, out)
    }

    /// Dense copy of the operator, for verification against general solvers
    pub fn to_dense(&self) -> DMatrix<f64> {
        let n = self.size();
        DMatrix::from_fn(n, n, |i, j| {
            if i == j {
                self.diag[i]
            } else if j + 1 == i {
                self.lower[i]
            } else if i + 1 == j {
                self.upper[i]
            } else {
                0.0
            }
        })
    }

    /// Infinity-norm residual `‖A·x - rhs‖∞`
    pub fn residual(&self, x: &[f64], rhs: &[f64]) -> PdeResult<f64> {
        let ax = DVector::from_vec(self.apply(x)?);
        if rhs.len() != ax.len() {
            return Err(length_mismatch(ax.len(), rhs.len(), x.len()));
        }
        let diff = ax - DVector::from_column_slice(rhs);
        Ok(diff.amax())
    }
}

fn length_mismatch(n: usize, got_a: usize, got_b: usize) -> PdeError {
    PdeError::InvalidConfiguration {
        field: "tridiagonal".to_string(),
        reason: format!(
            "vector lengths must equal system size {} (got {} and {})",
            n, got_a, got_b
        ),
    }
}

/// Solve the tridiagonal system `(a, b, c)·x = d`
///
/// `a` is the sub-diagonal, `b` the diagonal and `c` the super-diagonal, all
/// of length `n = d.len()`. The inputs are only read.
pub fn solve_tridiagonal(a: &[f64], b: &[f64], c: &[f64], d: &[f64]) -> PdeResult<Vec<f64>> {
    let n = d.len();
    let mut gamma = vec![0.0; n];
    let mut x = vec![0.0; n];
    thomas_solve_into(a, b, c, d, &mut gamma, &mut x)?;
    Ok(x)
}

/// Allocation-free Thomas algorithm
///
/// `gamma` receives the modified super-diagonal and `out` the solution; both
/// must have the system's length. On error `out` holds a partially
/// eliminated layer and must not be used.
pub fn thomas_solve_into(
    a: &[f64],
    b: &[f64],
    c: &[f64],
    d: &[f64],
    gamma: &mut [f64],
    out: &mut [f64],
) -> PdeResult<()> {
    let n = b.len();
    if a.len() != n || c.len() != n || d.len() != n || gamma.len() != n || out.len() != n {
        return Err(PdeError::InvalidConfiguration {
            field: "tridiagonal".to_string(),
            reason: format!(
                "input lengths must match (a={}, b={}, c={}, d={}, scratch={}, out={})",
                a.len(),
                n,
                c.len(),
                d.len(),
                gamma.len(),
                out.len()
            ),
        });
    }
    if n == 0 {
        return Ok(());
    }

    let mut beta = b[0];
    if beta == 0.0 {
        return Err(PdeError::SingularSystem { row: 0, step: None });
    }
    gamma[0] = 0.0;
    out[0] = d[0] / beta;

    // Forward elimination
    for j in 1..n {
        gamma[j] = c[j - 1] / beta;
        beta = b[j] - a[j] * gamma[j];
        if beta == 0.0 {
            return Err(PdeError::SingularSystem { row: j, step: None });
        }
        out[j] = (d[j] - a[j] * out[j - 1]) / beta;
    }

    // Back substitution
    for j in (0..n - 1).rev() {
        out[j] -= gamma[j + 1] * out[j + 1];
    }

    Ok(())
}
