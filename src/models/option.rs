// src/models/option.rs
//! European option contract and Black-Scholes market parameters
//!
//! The PDE engine reads these values and never mutates them: every solve
//! borrows an `OptionParams` and derives its own grid from it.

use crate::error::{validation::*, PdeError, PdeResult};
use std::fmt;
use std::str::FromStr;

/// Exercise payoff direction of a European option
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OptionKind {
    /// Right to buy at the strike: max(S - K, 0)
    Call,
    /// Right to sell at the strike: max(K - S, 0)
    Put,
}

impl OptionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionKind::Call => "call",
            OptionKind::Put => "put",
        }
    }

    /// Intrinsic value at spot `s` for strike `k`
    #[inline]
    pub fn intrinsic(&self, s: f64, k: f64) -> f64 {
        match self {
            OptionKind::Call => (s - k).max(0.0),
            OptionKind::Put => (k - s).max(0.0),
        }
    }
}

impl FromStr for OptionKind {
    type Err = PdeError;

    fn from_str(s: &str) -> PdeResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" => Ok(OptionKind::Call),
            "put" => Ok(OptionKind::Put),
            _ => Err(PdeError::InvalidOptionKind {
                kind: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OptionParams {
    pub s: f64,     // Spot price
    pub k: f64,     // Strike price
    pub t: f64,     // Time to maturity (years)
    pub r: f64,     // Risk-free rate
    pub q: f64,     // Continuous dividend yield
    pub sigma: f64, // Volatility
    pub kind: OptionKind,
}

impl OptionParams {
    pub fn new(s: f64, k: f64, t: f64, r: f64, q: f64, sigma: f64, kind: OptionKind) -> Self {
        OptionParams {
            s,
            k,
            t,
            r,
            q,
            sigma,
            kind,
        }
    }

    /// Validate the option parameters before any grid is built
    pub fn validate(&self) -> PdeResult<()> {
        validate_finite("s", self.s)?;
        validate_positive("s", self.s)?;
        validate_finite("k", self.k)?;
        validate_positive("k", self.k)?;
        validate_finite("t", self.t)?;
        validate_positive("t", self.t)?;
        validate_finite("r", self.r)?;
        validate_finite("q", self.q)?;
        validate_finite("sigma", self.sigma)?;
        validate_positive("sigma", self.sigma)?;
        Ok(())
    }

    /// Copy of these parameters with the opposite option kind
    pub fn with_kind(&self, kind: OptionKind) -> Self {
        OptionParams { kind, ..*self }
    }
}

impl Default for OptionParams {
    fn default() -> Self {
        OptionParams {
            s: 42.0,
            k: 40.0,
            t: 1.0,
            r: 0.1,
            q: 0.0,
            sigma: 0.2,
            kind: OptionKind::Call,
        }
    }
}

impl fmt::Display for OptionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "spot price:              {}", self.s)?;
        writeln!(f, "strike price:            {}", self.k)?;
        writeln!(f, "maturity:                {}", self.t)?;
        writeln!(f, "risk free interest rate: {}", self.r)?;
        writeln!(f, "dividend yield:          {}", self.q)?;
        writeln!(f, "volatility:              {}", self.sigma)?;
        write!(f, "kind:                    {}", self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_kind_case_insensitively() {
        assert_eq!("call".parse::<OptionKind>().unwrap(), OptionKind::Call);
        assert_eq!(" PUT ".parse::<OptionKind>().unwrap(), OptionKind::Put);
    }

    #[test]
    fn rejects_unknown_kind() {
        let err = "straddle".parse::<OptionKind>().unwrap_err();
        assert_eq!(
            err,
            PdeError::InvalidOptionKind {
                kind: "straddle".to_string()
            }
        );
    }

    #[test]
    fn intrinsic_values() {
        assert_eq!(OptionKind::Call.intrinsic(45.0, 40.0), 5.0);
        assert_eq!(OptionKind::Call.intrinsic(35.0, 40.0), 0.0);
        assert_eq!(OptionKind::Put.intrinsic(35.0, 40.0), 5.0);
        assert_eq!(OptionKind::Put.intrinsic(45.0, 40.0), 0.0);
    }

    #[test]
    fn validate_rejects_non_positive_inputs() {
        assert!(OptionParams::default().validate().is_ok());

        let zero_vol = OptionParams {
            sigma: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            zero_vol.validate(),
            Err(PdeError::InvalidParameters { ref parameter, .. }) if parameter == "sigma"
        ));

        let zero_maturity = OptionParams {
            t: 0.0,
            ..Default::default()
        };
        assert!(zero_maturity.validate().is_err());

        let nan_rate = OptionParams {
            r: f64::NAN,
            ..Default::default()
        };
        assert!(nan_rate.validate().is_err());
    }

    #[test]
    fn negative_rates_are_allowed() {
        let params = OptionParams {
            r: -0.01,
            q: 0.02,
            ..Default::default()
        };
        assert!(params.validate().is_ok());
    }
}
