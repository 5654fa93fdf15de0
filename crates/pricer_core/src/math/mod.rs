//! Numerical methods.
//!
//! - `solvers`: Iterative root-finding (fixed-step relaxation, Newton-Raphson)

pub mod solvers;
