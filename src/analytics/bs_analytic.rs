// src/analytics/bs_analytic.rs
//! Analytical Black-Scholes-Merton formulas for European options
//!
//! # Mathematical Foundation
//!
//! Under the Black-Scholes model with continuous dividend yield `q`:
//! ```text
//! dS_t = (r - q) S_t dt + σ S_t dW_t
//! ```
//!
//! The option value solves the PDE that the finite-difference engine
//! discretizes:
//! ```text
//! ∂V/∂t + ½σ²S²·∂²V/∂S² + (r - q)S·∂V/∂S - rV = 0
//! ```
//!
//! For European payoffs it has the closed form below. These prices are used
//! as the reference the grid solutions converge to.

use crate::math_utils::{norm_cdf, norm_pdf};
use crate::models::{OptionKind, OptionParams};

fn d1_d2(s: f64, k: f64, r: f64, q: f64, sigma: f64, t: f64) -> (f64, f64) {
    let vol_sqrt_t = sigma * t.sqrt();
    let d1 = ((s / k).ln() + (r - q + 0.5 * sigma * sigma) * t) / vol_sqrt_t;
    (d1, d1 - vol_sqrt_t)
}

/// Black-Scholes-Merton European call price
///
/// # Formula
/// ```text
/// C = S·e^(-qT)·Φ(d₁) - K·e^(-rT)·Φ(d₂)
/// d₁ = [ln(S/K) + (r - q + σ²/2)T] / (σ√T)
/// d₂ = d₁ - σ√T
/// ```
pub fn bs_call_price(s: f64, k: f64, r: f64, q: f64, sigma: f64, t: f64) -> f64 {
    let (d1, d2) = d1_d2(s, k, r, q, sigma, t);
    s * (-q * t).exp() * norm_cdf(d1) - k * (-r * t).exp() * norm_cdf(d2)
}

/// Black-Scholes-Merton European put price
///
/// # Formula
/// ```text
/// P = K·e^(-rT)·Φ(-d₂) - S·e^(-qT)·Φ(-d₁)
/// ```
pub fn bs_put_price(s: f64, k: f64, r: f64, q: f64, sigma: f64, t: f64) -> f64 {
    let (d1, d2) = d1_d2(s, k, r, q, sigma, t);
    k * (-r * t).exp() * norm_cdf(-d2) - s * (-q * t).exp() * norm_cdf(-d1)
}

/// Delta (∂V/∂S): `e^(-qT)Φ(d₁)` for calls, `e^(-qT)(Φ(d₁) - 1)` for puts
pub fn bs_delta(s: f64, k: f64, r: f64, q: f64, sigma: f64, t: f64, kind: OptionKind) -> f64 {
    let (d1, _) = d1_d2(s, k, r, q, sigma, t);
    let carry = (-q * t).exp();
    match kind {
        OptionKind::Call => carry * norm_cdf(d1),
        OptionKind::Put => carry * (norm_cdf(d1) - 1.0),
    }
}

/// Gamma (∂²V/∂S²), identical for calls and puts
///
/// ```text
/// Γ = e^(-qT)·φ(d₁) / (S·σ·√T)
/// ```
pub fn bs_gamma(s: f64, k: f64, r: f64, q: f64, sigma: f64, t: f64) -> f64 {
    let (d1, _) = d1_d2(s, k, r, q, sigma, t);
    (-q * t).exp() * norm_pdf(d1) / (s * sigma * t.sqrt())
}

/// Closed-form price for the option described by `params`
pub fn bs_price(params: &OptionParams) -> f64 {
    let OptionParams {
        s,
        k,
        t,
        r,
        q,
        sigma,
        kind,
    } = *params;
    match kind {
        OptionKind::Call => bs_call_price(s, k, r, q, sigma, t),
        OptionKind::Put => bs_put_price(s, k, r, q, sigma, t),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_call_price() {
        // S=42, K=40, r=10%, σ=20%
        let one_year = bs_price(&OptionParams::default());
        assert!((one_year - 6.8371).abs() < 1e-3, "price = {}", one_year);

        let six_months = bs_price(&OptionParams {
            t: 0.5,
            ..Default::default()
        });
        assert!((six_months - 4.7594).abs() < 1e-3, "price = {}", six_months);
    }

    #[test]
    fn put_call_parity_with_dividends() {
        let (s, k, r, q, sigma, t) = (100.0, 95.0, 0.03, 0.02, 0.25, 0.75);
        let call = bs_call_price(s, k, r, q, sigma, t);
        let put = bs_put_price(s, k, r, q, sigma, t);
        let forward = s * (-q * t).exp() - k * (-r * t).exp();
        assert!((call - put - forward).abs() < 1e-10);
    }

    #[test]
    fn put_delta_is_call_delta_minus_carry() {
        let (s, k, r, q, sigma, t) = (100.0, 100.0, 0.05, 0.01, 0.2, 1.0);
        let call = bs_delta(s, k, r, q, sigma, t, OptionKind::Call);
        let put = bs_delta(s, k, r, q, sigma, t, OptionKind::Put);
        assert!((call - put - (-q * t).exp()).abs() < 1e-12);
        assert!(bs_gamma(s, k, r, q, sigma, t) > 0.0);
    }
}
