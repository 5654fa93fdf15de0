//! # pricer_core: Numerical Foundation for Implied Volatility
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - Iterative root-finding solvers (`math::solvers`)
//! - Solver configuration and tagged outcomes (`math::solvers`)
//! - Solver error type: `SolverError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::math::solvers::{RelaxationSolver, SolverConfig};
//!
//! // Drive x² towards 2 with a fixed relaxation step
//! let solver = RelaxationSolver::new(SolverConfig::new(1e-10, 1000));
//! let outcome = solver.solve(|x: f64| x * x, 2.0, 0.2, 1.0).unwrap();
//!
//! assert!(outcome.is_converged());
//! assert!((outcome.value() - 2.0_f64.sqrt()).abs() < 1e-9);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for `SolverConfig`, `SolverOutcome` and errors

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
