//! Analytical pricing formulas for European call options.
//!
//! This module provides:
//! - Standard normal CDF/PDF (`distributions`)
//! - Black-Scholes call price, d1/d2 and vega (`black_scholes`)
//! - Analytical error types (`error`)
//!
//! ## Numerical Stability
//!
//! The CDF is built on the `statrs` complementary error function, which is
//! accurate to around 1e-15, well inside the 1e-10 needed for the solver
//! tolerances used in implied volatility extraction.

pub mod black_scholes;
pub mod distributions;
pub mod error;
pub(crate) mod validate;

// Re-export main types at module level
pub use black_scholes::{black_scholes_call, black_scholes_vega, BlackScholes};
pub use distributions::{norm_cdf, norm_pdf};
pub use error::AnalyticalError;
