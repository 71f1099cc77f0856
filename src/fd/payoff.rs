// src/fd/payoff.rs
//! Terminal condition of the backward PDE solve
//!
//! At maturity the option is worth its intrinsic value, so the engine starts
//! from `f(Sⱼ, T) = max(Sⱼ - K, 0)` for calls and `max(K - Sⱼ, 0)` for puts
//! with `Sⱼ = j·ds`, and steps back to `t = 0`.

use super::grid::Grid;
use crate::models::OptionKind;

/// Terminal values on `n_s + 1` nodes spaced `ds` apart
pub fn terminal_values(n_s: usize, ds: f64, strike: f64, kind: OptionKind) -> Vec<f64> {
    (0..=n_s)
        .map(|j| kind.intrinsic(j as f64 * ds, strike))
        .collect()
}

/// Terminal values on a resolved grid
pub fn terminal_layer(grid: &Grid, strike: f64, kind: OptionKind) -> Vec<f64> {
    terminal_values(grid.n_s, grid.ds, strike, kind)
}
