pub mod tridiagonal;

pub use tridiagonal::{solve_tridiagonal, thomas_solve_into, Tridiagonal};
