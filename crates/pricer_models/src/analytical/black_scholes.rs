//! Black-Scholes pricing model for European call options.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//!
//! **Vega**: ∂C/∂σ = S·√T·φ(d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! The free functions are permissive: they do not validate and let IEEE 754
//! arithmetic decide what σ = 0, T = 0 or S, K ≤ 0 produce. [`BlackScholes`]
//! is the validated entry point.

use super::distributions::{norm_cdf, norm_pdf};
use super::error::AnalyticalError;
use super::validate;

/// d₁ and d₂ without validation.
#[inline]
fn d1_d2(spot: f64, strike: f64, rate: f64, expiry: f64, volatility: f64) -> (f64, f64) {
    let vol_sqrt_t = volatility * expiry.sqrt();
    let d1 = ((spot / strike).ln() + (rate + 0.5 * volatility * volatility) * expiry) / vol_sqrt_t;
    (d1, d1 - vol_sqrt_t)
}

/// Black-Scholes price of a European call.
///
/// C = S·N(d₁) - K·e^(-rT)·N(d₂)
///
/// No input is checked. σ = 0 or T = 0 divide by zero inside d₁, and
/// S/K ≤ 0 take the logarithm of a non-positive number; the resulting NaN or
/// infinity flows through to the returned price. Nothing panics.
///
/// # Arguments
/// * `spot` - Underlying price (S)
/// * `strike` - Strike price (K)
/// * `rate` - Continuously compounded risk-free rate (r)
/// * `expiry` - Time to expiration in years (T)
/// * `volatility` - Annualised volatility (σ)
///
/// # Examples
/// ```
/// use pricer_models::analytical::black_scholes_call;
///
/// let price = black_scholes_call(100.0, 100.0, 0.05, 1.0, 0.2);
/// assert!((price - 10.450583572185565).abs() < 1e-10);
///
/// // σ = 0 at the money with r = 0: 0/0 in d₁
/// assert!(black_scholes_call(100.0, 100.0, 0.0, 1.0, 0.0).is_nan());
/// ```
#[inline]
pub fn black_scholes_call(spot: f64, strike: f64, rate: f64, expiry: f64, volatility: f64) -> f64 {
    let (d1, d2) = d1_d2(spot, strike, rate, expiry, volatility);
    spot * norm_cdf(d1) - strike * (-rate * expiry).exp() * norm_cdf(d2)
}

/// Black-Scholes vega of a European call, without validation.
///
/// Vega = S·√T·φ(d₁)
#[inline]
pub fn black_scholes_vega(spot: f64, strike: f64, rate: f64, expiry: f64, volatility: f64) -> f64 {
    let (d1, _) = d1_d2(spot, strike, rate, expiry, volatility);
    spot * expiry.sqrt() * norm_pdf(d1)
}

/// Validated Black-Scholes model for European call pricing.
///
/// Holds the market state (spot, rate, volatility); contract terms are
/// passed per call and validated there.
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0, 0.05, 0.2).unwrap();
/// let price = bs.price_call(100.0, 1.0).unwrap();
/// assert!(price > 0.0 && price < 100.0);
///
/// assert!(BlackScholes::new(100.0, 0.05, 0.0).is_err());
/// assert!(bs.price_call(100.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlackScholes {
    /// Spot price (S)
    spot: f64,
    /// Risk-free interest rate (r)
    rate: f64,
    /// Volatility (σ)
    volatility: f64,
}

impl BlackScholes {
    /// Creates a new Black-Scholes model.
    ///
    /// # Arguments
    /// * `spot` - Current spot price (must be positive and finite)
    /// * `rate` - Risk-free interest rate (annualised, finite, may be negative)
    /// * `volatility` - Volatility (must be positive and finite)
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if spot <= 0 or non-finite
    /// - `AnalyticalError::InvalidRate` if rate is non-finite
    /// - `AnalyticalError::InvalidVolatility` if volatility <= 0 or non-finite
    pub fn new(spot: f64, rate: f64, volatility: f64) -> Result<Self, AnalyticalError> {
        Ok(Self {
            spot: validate::spot(spot)?,
            rate: validate::rate(rate)?,
            volatility: validate::volatility(volatility)?,
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    fn terms(&self, strike: f64, expiry: f64) -> Result<(f64, f64), AnalyticalError> {
        validate::strike(strike)?;
        validate::expiry(expiry)?;
        Ok(d1_d2(self.spot, strike, self.rate, expiry, self.volatility))
    }

    /// Computes the d1 term.
    ///
    /// # Errors
    /// `InvalidStrike` / `InvalidExpiry` for non-positive or non-finite contract terms.
    pub fn d1(&self, strike: f64, expiry: f64) -> Result<f64, AnalyticalError> {
        self.terms(strike, expiry).map(|(d1, _)| d1)
    }

    /// Computes the d2 term.
    ///
    /// # Errors
    /// `InvalidStrike` / `InvalidExpiry` for non-positive or non-finite contract terms.
    pub fn d2(&self, strike: f64, expiry: f64) -> Result<f64, AnalyticalError> {
        self.terms(strike, expiry).map(|(_, d2)| d2)
    }

    /// Computes the European call price.
    ///
    /// # Errors
    /// `InvalidStrike` / `InvalidExpiry` for non-positive or non-finite contract terms.
    pub fn price_call(&self, strike: f64, expiry: f64) -> Result<f64, AnalyticalError> {
        self.terms(strike, expiry)?;
        Ok(black_scholes_call(
            self.spot,
            strike,
            self.rate,
            expiry,
            self.volatility,
        ))
    }

    /// Computes vega (∂C/∂σ), always non-negative.
    ///
    /// # Errors
    /// `InvalidStrike` / `InvalidExpiry` for non-positive or non-finite contract terms.
    pub fn vega(&self, strike: f64, expiry: f64) -> Result<f64, AnalyticalError> {
        self.terms(strike, expiry)?;
        Ok(black_scholes_vega(
            self.spot,
            strike,
            self.rate,
            expiry,
            self.volatility,
        ))
    }
}
