pub mod boundary;
pub mod engine;
pub mod grid;
pub mod payoff;
pub mod sweep;

pub use boundary::{BoundaryCondition, BoundaryContext};
pub use engine::{fd_price_option, solve, solve_by_codes, FdConfig, PdeSolution, TimeStepper};
pub use grid::{Grid, GridSize};
pub use sweep::{convergence_sweep, SchemeSet, SweepConfig, SweepSurface};
