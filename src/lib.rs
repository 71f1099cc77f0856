//! # fast-pde: Finite-Difference Black-Scholes Engine
//!
//! A Rust library that prices European options by discretizing the
//! Black-Scholes PDE on a uniform spot/time grid and stepping it backward
//! from the payoff at maturity.
//!
//! ## Key Features
//!
//! - **Three schemes**: explicit, fully implicit and Crank-Nicolson behind one
//!   time stepper ([`schemes::FdScheme`])
//! - **Four boundary policies**: Neumann, Dirichlet, discounting and free edges
//! - **Thomas algorithm**: linear-time tridiagonal solver with singular-pivot
//!   detection
//! - **Convergence sweeps**: parallel `(n_s, n_t)` surfaces against the
//!   closed-form price
//!
//! ## Quick Start
//!
//! ```rust
//! use fast_pde::fd::{fd_price_option, BoundaryCondition, FdConfig, GridSize};
//! use fast_pde::models::OptionParams;
//! use fast_pde::schemes::Scheme;
//!
//! // S=42, K=40, T=1, r=10%, σ=20% European call
//! let params = OptionParams::default();
//! let config = FdConfig {
//!     grid: GridSize::Fixed(200),
//!     time_steps: 200,
//!     scheme: Scheme::CrankNicolson,
//!     boundary: BoundaryCondition::Dirichlet,
//!     ..Default::default()
//! };
//!
//! let solution = fd_price_option(&params, &config).expect("Valid configuration");
//! println!("Option price: {:.4} (Δ = {:.4})", solution.price, solution.delta);
//! ```
//!
//! ## Mathematical Foundation
//!
//! The option value `f(S, t)` satisfies
//! ```text
//! ∂f/∂t + ½σ²S²·∂²f/∂S² + (r - q)S·∂f/∂S - rf = 0,   f(S, T) = payoff(S)
//! ```
//! Central differences in `S` on nodes `Sⱼ = j·ds` turn each time step into a
//! tridiagonal linear system.

// Module declarations
pub mod analytics;
pub mod error;
pub mod fd;
pub mod linalg;
pub mod math_utils;
pub mod models;
pub mod output;
pub mod schemes;

// Re-export commonly used types for convenience
pub use error::{PdeError, PdeResult};
pub use fd::{solve, FdConfig, GridSize, PdeSolution};
