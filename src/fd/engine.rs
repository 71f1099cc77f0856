// src/fd/engine.rs
//! Backward time stepping for the Black-Scholes PDE
//!
//! # Algorithm
//!
//! Starting from the payoff at `t = T`, each of the `n_t` steps produces the
//! layer one `dt` closer to today:
//!
//! 1. right-hand side `g = R·f` (or `g = f` when the scheme has no explicit side)
//! 2. edge entries of `g` set by the boundary policy, if it pins them
//! 3. `L·f_new = g` solved with the Thomas algorithm (skipped when `L = I`)
//! 4. `f ← f_new`, then edge values overwritten by the boundary policy
//!
//! The price is read at node `n_s/2`, which sits exactly on the spot.
//!
//! # Memory
//!
//! A [`TimeStepper`] owns every vector it touches: the value layer, the
//! right-hand side, the Thomas scratch and the operators. Steps mutate them in
//! place; nothing is shared between two steppers, so independent solves can
//! run on separate threads.

use super::boundary::{BoundaryCondition, BoundaryContext};
use super::grid::{Grid, GridSize};
use super::payoff::terminal_layer;
use crate::error::{validation::*, PdeError, PdeResult};
use crate::models::OptionParams;
use crate::schemes::{Scheme, SchemeOperators};

#[derive(Clone, Debug, PartialEq)]
pub struct FdConfig {
    pub grid: GridSize,
    pub time_steps: usize,
    pub scheme: Scheme,
    pub boundary: BoundaryCondition,
    pub quiet: bool, // Suppress stability warnings on stderr
}

impl FdConfig {
    /// Validate the finite-difference configuration
    pub fn validate(&self) -> PdeResult<()> {
        validate_steps(self.time_steps)?;
        if let GridSize::Fixed(n_s) = self.grid {
            validate_nodes(n_s + n_s % 2)?;
        }
        Ok(())
    }
}

impl Default for FdConfig {
    fn default() -> Self {
        FdConfig {
            grid: GridSize::Fixed(200),
            time_steps: 200,
            scheme: Scheme::CrankNicolson,
            boundary: BoundaryCondition::Dirichlet,
            quiet: false,
        }
    }
}

/// Result of a full backward solve
#[derive(Clone, Debug)]
pub struct PdeSolution {
    pub price: f64,
    pub delta: f64,
    pub gamma: f64,
    pub grid: Grid,
    pub scheme: Scheme,
    pub boundary: BoundaryCondition,
    /// Option values at `t = 0` on every spot node
    pub values: Vec<f64>,
}

impl PdeSolution {
    /// Spot coordinates matching `values`
    pub fn spots(&self) -> Vec<f64> {
        self.grid.spots()
    }
}

pub struct TimeStepper {
    grid: Grid,
    scheme: Scheme,
    boundary: BoundaryCondition,
    context: BoundaryContext,
    ops: SchemeOperators,
    values: Vec<f64>,
    rhs: Vec<f64>,
    gamma: Vec<f64>,
    next: Vec<f64>,
    steps_taken: usize,
}

impl TimeStepper {
    /// Validate inputs, build the grid, operators and terminal layer
    pub fn new(params: &OptionParams, config: &FdConfig) -> PdeResult<Self> {
        params.validate()?;
        config.validate()?;

        let grid = Grid::build(params, config.grid, config.time_steps)?;
        let strategy = config.scheme.strategy();

        let mut ops = strategy.build_operators(&grid, params);
        strategy.apply_boundary(config.boundary, &mut ops);

        if !config.quiet {
            if let Some(warning) = strategy.stability_warning(&grid, params) {
                eprintln!("WARNING!: {} scheme: {}", strategy.name(), warning);
            }
        }

        let nodes = grid.nodes();
        Ok(TimeStepper {
            grid,
            scheme: config.scheme,
            boundary: config.boundary,
            context: BoundaryContext::new(params, &grid),
            ops,
            values: terminal_layer(&grid, params.k, params.kind),
            rhs: vec![0.0; nodes],
            gamma: vec![0.0; nodes],
            next: vec![0.0; nodes],
            steps_taken: 0,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Current value layer, indexed by spot node
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    pub fn is_finished(&self) -> bool {
        self.steps_taken >= self.grid.n_t
    }

    /// Advance one `dt` backward in time
    pub fn step(&mut self) -> PdeResult<()> {
        if self.is_finished() {
            return Err(PdeError::InvalidConfiguration {
                field: "time_steps".to_string(),
                reason: format!("all {} steps already taken", self.grid.n_t),
            });
        }

        let n = self.grid.n_s;
        let step = self.steps_taken;
        let tau = self.grid.tau_after(step);

        match &self.ops.explicit {
            Some(op) => op.apply_into(&self.values, &mut self.rhs)?,
            None => self.rhs.copy_from_slice(&self.values),
        }

        let edges = self.boundary.edge_values(&self.context, tau, &self.values);
        if let Some((lo, hi)) = edges {
            self.rhs[0] = lo;
            self.rhs[n] = hi;
        }

        match &self.ops.implicit {
            Some(op) => op
                .solve_into(&self.rhs, &mut self.gamma, &mut self.next)
                .map_err(|e| e.at_step(step + 1))?,
            None => self.next.copy_from_slice(&self.rhs),
        }

        std::mem::swap(&mut self.values, &mut self.next);
        if let Some((lo, hi)) = edges {
            self.values[0] = lo;
            self.values[n] = hi;
        }

        self.steps_taken += 1;
        Ok(())
    }

    /// Step down to `t = 0` and read the solution at the spot node
    pub fn run(mut self) -> PdeResult<PdeSolution> {
        while !self.is_finished() {
            self.step()?;
        }

        let m = self.grid.mid_index();
        let ds = self.grid.ds;
        let price = self.values[m];
        if !price.is_finite() {
            return Err(PdeError::NumericalInstability {
                method: format!("{} finite differences", self.scheme.name()),
                reason: format!(
                    "price at the spot node is {} (n_s={}, n_t={})",
                    price, self.grid.n_s, self.grid.n_t
                ),
            });
        }

        let (up, down) = (self.values[m + 1], self.values[m - 1]);
        Ok(PdeSolution {
            price,
            delta: (up - down) / (2.0 * ds),
            gamma: (up - 2.0 * price + down) / (ds * ds),
            grid: self.grid,
            scheme: self.scheme,
            boundary: self.boundary,
            values: self.values,
        })
    }
}

/// Price the option and return the full final layer
pub fn fd_price_option(params: &OptionParams, config: &FdConfig) -> PdeResult<PdeSolution> {
    TimeStepper::new(params, config)?.run()
}

/// Price at `(S, t = 0)` for the given grid, scheme and boundary policy
pub fn solve(
    params: &OptionParams,
    n_s: GridSize,
    n_t: usize,
    scheme: Scheme,
    boundary: BoundaryCondition,
) -> PdeResult<f64> {
    let config = FdConfig {
        grid: n_s,
        time_steps: n_t,
        scheme,
        boundary,
        ..Default::default()
    };
    fd_price_option(params, &config).map(|solution| solution.price)
}

/// [`solve`] with the scheme and boundary given by their textual codes
pub fn solve_by_codes(
    params: &OptionParams,
    n_s: GridSize,
    n_t: usize,
    scheme: &str,
    boundary: &str,
) -> PdeResult<f64> {
    let boundary: BoundaryCondition = boundary.parse()?;
    let scheme: Scheme = scheme.parse()?;
    solve(params, n_s, n_t, scheme, boundary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::bs_analytic::bs_price;

    fn quiet(grid: usize, time_steps: usize, scheme: Scheme, boundary: BoundaryCondition) -> FdConfig {
        FdConfig {
            grid: GridSize::Fixed(grid),
            time_steps,
            scheme,
            boundary,
            quiet: true,
        }
    }

    #[test]
    fn default_config_prices_reference_call() {
        let params = OptionParams::default();
        let solution = fd_price_option(&params, &FdConfig::default()).unwrap();
        let analytic = bs_price(&params);
        assert!(
            (solution.price - analytic).abs() / analytic < 0.01,
            "FD = {:.4}, BS = {:.4}",
            solution.price,
            analytic
        );
        assert_eq!(solution.values.len(), solution.grid.nodes());
    }

    #[test]
    fn stepper_counts_steps_and_stops() {
        let params = OptionParams::default();
        let config = quiet(20, 3, Scheme::Implicit, BoundaryCondition::Dirichlet);
        let mut stepper = TimeStepper::new(&params, &config).unwrap();
        for _ in 0..3 {
            assert!(!stepper.is_finished());
            stepper.step().unwrap();
        }
        assert_eq!(stepper.steps_taken(), 3);
        assert!(stepper.is_finished());
        assert!(stepper.step().is_err());
    }

    #[test]
    fn dirichlet_edges_are_pinned_each_step() {
        let params = OptionParams::default();
        let config = quiet(20, 10, Scheme::CrankNicolson, BoundaryCondition::Dirichlet);
        let mut stepper = TimeStepper::new(&params, &config).unwrap();
        stepper.step().unwrap();

        let grid = *stepper.grid();
        let tau = grid.dt;
        let expected_hi = grid.s_max - params.k * (-params.r * tau).exp();
        assert_eq!(stepper.values()[0], 0.0);
        assert!((stepper.values()[grid.n_s] - expected_hi).abs() < 1e-12);
    }

    #[test]
    fn free_edges_are_carried_unchanged() {
        let params = OptionParams::default();
        for scheme in Scheme::ALL {
            let config = quiet(20, 400, scheme, BoundaryCondition::Free);
            let mut stepper = TimeStepper::new(&params, &config).unwrap();
            let top = stepper.values()[20];
            for _ in 0..5 {
                stepper.step().unwrap();
            }
            assert_eq!(stepper.values()[0], 0.0);
            assert!((stepper.values()[20] - top).abs() < 1e-12, "{}", scheme);
        }
    }

    #[test]
    fn discount_edges_grow_by_rate() {
        let params = OptionParams::default();
        let config = quiet(20, 10, Scheme::Implicit, BoundaryCondition::Discount);
        let mut stepper = TimeStepper::new(&params, &config).unwrap();
        let top = stepper.values()[20];
        stepper.step().unwrap();
        let growth = (params.r * stepper.grid().dt).exp();
        assert!((stepper.values()[20] - top * growth).abs() < 1e-12);
    }

    #[test]
    fn solve_by_codes_rejects_unknown_boundary() {
        let params = OptionParams::default();
        let err = solve_by_codes(&params, GridSize::Fixed(20), 20, "cn", "q").unwrap_err();
        assert!(matches!(err, PdeError::InvalidConfiguration { ref field, .. } if field == "boundary"));
    }

    #[test]
    fn zero_time_steps_rejected_before_stepping() {
        let params = OptionParams::default();
        let config = FdConfig {
            time_steps: 0,
            ..Default::default()
        };
        assert!(matches!(
            fd_price_option(&params, &config),
            Err(PdeError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn grid_greeks_match_analytic() {
        let params = OptionParams::default();
        let config = quiet(400, 400, Scheme::CrankNicolson, BoundaryCondition::Dirichlet);
        let solution = fd_price_option(&params, &config).unwrap();

        let (s, k, r, q, sigma, t) = (params.s, params.k, params.r, params.q, params.sigma, params.t);
        let delta = crate::analytics::bs_analytic::bs_delta(s, k, r, q, sigma, t, params.kind);
        let gamma = crate::analytics::bs_analytic::bs_gamma(s, k, r, q, sigma, t);
        assert!((solution.delta - delta).abs() < 5e-3, "delta {} vs {}", solution.delta, delta);
        assert!((solution.gamma - gamma).abs() < 5e-3, "gamma {} vs {}", solution.gamma, gamma);
    }
}
