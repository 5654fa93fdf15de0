//! # Pricer Models (L2: Business Logic)
//!
//! Black-Scholes call pricing and implied volatility extraction.
//!
//! This crate provides:
//! - Standard normal distribution functions
//! - The Black-Scholes European call formula, permissive and validated
//! - Implied volatility solvers (fixed-step relaxation, Newton on vega)
//!
//! ## Design Principles
//!
//! - **Permissive kernels**: [`black_scholes_call`] and [`implied_volatility`]
//!   never fail; invalid inputs surface as NaN/∞ exactly as IEEE 754 produces them
//! - **Checked wrappers**: [`analytical::BlackScholes`] and
//!   [`implied_vol::ImpliedVolSolver`] validate inputs and report distinct outcomes
//! - **Pure functions**: no global state, every type is `Send + Sync`
//!
//! ## Example
//!
//! ```
//! use pricer_models::{black_scholes_call, implied_volatility};
//!
//! let price = black_scholes_call(100.0, 100.0, 0.05, 1.0, 0.2);
//! let vol = implied_volatility(100.0, 100.0, 0.05, 1.0, price, 0.1, 1e-6, 1000);
//! assert!((vol - 0.2).abs() < 1e-4);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod implied_vol;

pub use analytical::black_scholes_call;
pub use implied_vol::implied_volatility;
