pub mod crank_nicolson;
pub mod explicit;
pub mod implicit;
pub mod scheme;

pub use crank_nicolson::CrankNicolsonScheme;
pub use explicit::ExplicitScheme;
pub use implicit::ImplicitScheme;
pub use scheme::{FdScheme, SchemeOperators};

use crate::error::{PdeError, PdeResult};
use std::fmt;
use std::str::FromStr;

static EXPLICIT: ExplicitScheme = ExplicitScheme;
static IMPLICIT: ImplicitScheme = ImplicitScheme;
static CRANK_NICOLSON: CrankNicolsonScheme = CrankNicolsonScheme;

/// Time-stepping scheme selector
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scheme {
    Explicit,
    Implicit,
    CrankNicolson,
}

impl Scheme {
    pub const ALL: [Scheme; 3] = [Scheme::Explicit, Scheme::Implicit, Scheme::CrankNicolson];

    /// Strategy object implementing this scheme
    pub fn strategy(&self) -> &'static dyn FdScheme {
        match self {
            Scheme::Explicit => &EXPLICIT,
            Scheme::Implicit => &IMPLICIT,
            Scheme::CrankNicolson => &CRANK_NICOLSON,
        }
    }

    pub fn name(&self) -> &'static str {
        self.strategy().name()
    }
}

impl FromStr for Scheme {
    type Err = PdeError;

    fn from_str(s: &str) -> PdeResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "explicit" | "e" => Ok(Scheme::Explicit),
            "implicit" | "i" => Ok(Scheme::Implicit),
            "crank-nicolson" | "crank_nicolson" | "cranknicolson" | "cn" => {
                Ok(Scheme::CrankNicolson)
            }
            other => Err(PdeError::InvalidConfiguration {
                field: "scheme".to_string(),
                reason: format!("unrecognized scheme '{}'", other),
            }),
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
