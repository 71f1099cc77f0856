pub mod option;

pub use option::{OptionKind, OptionParams};
