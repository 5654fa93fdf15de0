//! Error types for analytical pricing operations.
//!
//! This module provides:
//! - `AnalyticalError`: Errors from the checked Black-Scholes and implied volatility APIs

use pricer_core::types::SolverError;
use thiserror::Error;

/// Analytical pricing errors.
///
/// Provides structured error handling for analytical pricing operations
/// with descriptive context for each failure mode.
///
/// # Examples
/// ```
/// use pricer_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
/// assert!(format!("{}", err).contains("volatility"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnalyticalError {
    /// Invalid volatility (non-positive or non-finite).
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Invalid spot price (non-positive or non-finite).
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The invalid spot price value
        spot: f64,
    },

    /// Invalid strike (non-positive or non-finite).
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Invalid time to expiry (non-positive or non-finite).
    #[error("Invalid expiry: T = {expiry}")]
    InvalidExpiry {
        /// The invalid expiry value
        expiry: f64,
    },

    /// Non-finite risk-free rate.
    #[error("Invalid rate: r = {rate}")]
    InvalidRate {
        /// The invalid rate value
        rate: f64,
    },

    /// Market price outside the no-arbitrage range `((S − K·e^(−rT))⁺, S)`.
    #[error("Invalid market price: {price} outside ({lower}, {upper})")]
    InvalidMarketPrice {
        /// The invalid market price
        price: f64,
        /// Discounted intrinsic value, the exclusive lower bound
        lower: f64,
        /// Spot price, the exclusive upper bound
        upper: f64,
    },

    /// Invalid solver settings.
    #[error("Invalid solver configuration: {message}")]
    InvalidSolverConfig {
        /// Description of the invalid setting
        message: String,
    },

    /// Implied volatility did not reach the tolerance.
    #[error("Implied volatility did not converge after {iterations} iterations (error = {residual})")]
    NotConverged {
        /// Iterations used
        iterations: usize,
        /// Absolute pricing error of the last iteration
        residual: f64,
    },

    /// Numerical instability during computation.
    #[error("Numerical instability: {message}")]
    NumericalInstability {
        /// Description of the numerical issue
        message: String,
    },
}

impl From<SolverError> for AnalyticalError {
    fn from(err: SolverError) -> Self {
        match err {
            SolverError::InvalidConfig(message) => AnalyticalError::InvalidSolverConfig { message },
            SolverError::MaxIterationsExceeded {
                iterations,
                residual,
            } => AnalyticalError::NotConverged {
                iterations,
                residual,
            },
            SolverError::DerivativeNearZero { x } => AnalyticalError::NumericalInstability {
                message: format!("vega vanished at σ = {}", x),
            },
            SolverError::NoBracket { a, b } => AnalyticalError::NumericalInstability {
                message: format!("no volatility in [{}, {}] reproduces the price", a, b),
            },
            SolverError::NumericalInstability(message) => {
                AnalyticalError::NumericalInstability { message }
            }
        }
    }
}
