//! Solve command implementation
//!
//! Inverts Black-Scholes for a single call quote.

use std::io::Write;

use pricer_core::math::solvers::SolverOutcome;
use pricer_models::implied_vol::{CallQuote, UpdateMethod};
use serde::Serialize;
use tracing::{info, warn};

use super::OutputFormat;
use crate::config::SolverSettings;
use crate::{CliError, Result};

/// JSON document written by `impvol solve --format json`
#[derive(Debug, Serialize)]
struct SolveReport<'a> {
    quote: &'a CallQuote,
    initial_vol: f64,
    method: UpdateMethod,
    outcome: &'a SolverOutcome<f64>,
}

/// Run the solve command
pub fn run<W: Write>(
    quote: &CallQuote,
    settings: &SolverSettings,
    strict: bool,
    format: OutputFormat,
    verbose: bool,
    out: &mut W,
) -> Result<()> {
    info!(
        spot = quote.spot,
        strike = quote.strike,
        rate = quote.rate,
        expiry = quote.expiry,
        market_price = quote.market_price,
        method = %settings.method,
        "Solving for implied volatility"
    );

    let solver = settings.solver();
    let outcome = solver.solve(quote, settings.initial_vol)?;

    if let SolverOutcome::IterationLimitExceeded {
        value,
        iterations,
        residual,
    } = outcome
    {
        if strict {
            return Err(CliError::NotConverged {
                value,
                iterations,
                residual,
            });
        }
        warn!(iterations, residual, "Iteration budget exhausted, reporting last estimate");
    }

    match format {
        OutputFormat::Text => {
            writeln!(out, "Implied Volatility: {}", outcome.value())?;
            if verbose {
                let status = if outcome.is_converged() {
                    "converged"
                } else {
                    "iteration limit exceeded"
                };
                writeln!(out, "Status: {}", status)?;
                writeln!(out, "Iterations: {}", outcome.iterations())?;
                writeln!(out, "Pricing error: {:e}", outcome.residual())?;
            }
        }
        OutputFormat::Json => {
            let report = SolveReport {
                quote,
                initial_vol: settings.initial_vol,
                method: solver.method(),
                outcome: &outcome,
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        }
    }

    Ok(())
}
