//! Implied volatility solvers.

use pricer_core::math::solvers::{
    NewtonRaphsonSolver, RelaxationSolver, SolverConfig, SolverOutcome,
};
use tracing::{debug, trace};

use super::CallQuote;
use crate::analytical::{validate, AnalyticalError};

/// Learning rate of the fixed-step update, `σ ← σ + 0.1 · (market − model) / S`.
pub const DEFAULT_LEARNING_RATE: f64 = 0.1;

/// Lower end of the Newton search interval.
const MIN_VOL: f64 = 1e-6;

/// First upper end tried by the Newton search; doubled until it brackets.
const INITIAL_MAX_VOL: f64 = 5.0;

/// Upper end beyond which no bracket is attempted.
const MAX_VOL: f64 = 1e3;

/// Estimate the implied volatility of a European call.
///
/// Runs the fixed-step update
///
/// `σ ← σ + 0.1 · (market_price − C(σ)) / S`
///
/// while `|C(σ) − market_price| > tolerance` and fewer than `max_iterations`
/// iterations have run. The pricing error starts at `1.0`, so with
/// `tolerance >= 1` no iteration runs and `initial_vol` is returned.
///
/// The last estimate is returned unconditionally: convergence and an
/// exhausted budget look the same to the caller, and NaN from degenerate
/// inputs (σ = 0, T = 0, S or K ≤ 0) comes back as NaN. Use
/// [`ImpliedVolSolver`] to tell these cases apart.
///
/// # Examples
/// ```
/// use pricer_models::implied_volatility;
///
/// let vol = implied_volatility(100.0, 100.0, 0.05, 1.0, 10.0, 0.2, 1e-6, 1000);
/// assert!(vol.is_finite());
/// assert!((vol - 0.18797167).abs() < 1e-6);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn implied_volatility(
    spot: f64,
    strike: f64,
    rate: f64,
    expiry: f64,
    market_price: f64,
    initial_vol: f64,
    tolerance: f64,
    max_iterations: usize,
) -> f64 {
    let quote = CallQuote::new(spot, strike, rate, expiry, market_price);

    RelaxationSolver::new(SolverConfig::new(tolerance, max_iterations))
        .with_scale(spot)
        .run(
            |vol| quote.price_at(vol),
            market_price,
            DEFAULT_LEARNING_RATE,
            initial_vol,
        )
        .value
}

/// Volatility update rule.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum UpdateMethod {
    /// `σ ← σ + learning_rate · (market − model) / S`
    FixedStep {
        /// Multiplier on the spot-normalised pricing error
        learning_rate: f64,
    },
    /// `σ ← σ − (model − market) / vega`, bisecting instead whenever the
    /// step would leave the volatility interval known to hold the root
    Newton,
}

impl Default for UpdateMethod {
    fn default() -> Self {
        UpdateMethod::FixedStep {
            learning_rate: DEFAULT_LEARNING_RATE,
        }
    }
}

/// Validated implied volatility solver.
///
/// # Examples
/// ```
/// use pricer_core::math::solvers::{SolverConfig, SolverOutcome};
/// use pricer_models::implied_vol::{CallQuote, ImpliedVolSolver, UpdateMethod};
///
/// let quote = CallQuote::new(100.0, 100.0, 0.05, 1.0, 10.450583572185565);
/// let solver = ImpliedVolSolver::new(SolverConfig::new(1e-10, 50), UpdateMethod::Newton);
///
/// match solver.solve(&quote, 0.5).unwrap() {
///     SolverOutcome::Converged { value, .. } => assert!((value - 0.2).abs() < 1e-9),
///     SolverOutcome::IterationLimitExceeded { .. } => panic!("should converge"),
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ImpliedVolSolver {
    config: SolverConfig<f64>,
    method: UpdateMethod,
}

impl ImpliedVolSolver {
    /// Create a solver.
    pub fn new(config: SolverConfig<f64>, method: UpdateMethod) -> Self {
        Self { config, method }
    }

    /// Returns the tolerance and iteration budget.
    pub fn config(&self) -> &SolverConfig<f64> {
        &self.config
    }

    /// Returns the update rule.
    pub fn method(&self) -> UpdateMethod {
        self.method
    }

    /// Solve for the volatility reproducing `quote.market_price`.
    ///
    /// At least one iteration always runs. `Converged` means the absolute
    /// pricing error of the last evaluation was within tolerance;
    /// `IterationLimitExceeded` carries the last estimate and error.
    ///
    /// # Errors
    /// - `Invalid*` for a quote or initial volatility that fails validation
    /// - `InvalidSolverConfig` for a negative/NaN tolerance, zero budget or bad learning rate
    /// - `NumericalInstability` when the iteration leaves finite territory, or
    ///   for Newton when no volatility in `[1e-6, 1e3]` reproduces the price
    pub fn solve(
        &self,
        quote: &CallQuote,
        initial_vol: f64,
    ) -> Result<SolverOutcome<f64>, AnalyticalError> {
        quote.validate()?;
        validate::volatility(initial_vol)?;

        let outcome = match self.method {
            UpdateMethod::FixedStep { learning_rate } => {
                if !validate::is_positive_finite(learning_rate) {
                    return Err(AnalyticalError::InvalidSolverConfig {
                        message: format!(
                            "learning rate must be positive and finite, got {}",
                            learning_rate
                        ),
                    });
                }

                RelaxationSolver::new(self.config)
                    .with_scale(quote.spot)
                    .solve(
                        |vol| {
                            let price = quote.price_at(vol);
                            trace!(vol, price, "fixed-step iteration");
                            price
                        },
                        quote.market_price,
                        learning_rate,
                        initial_vol,
                    )?
            }
            UpdateMethod::Newton => {
                let upper = newton_upper_bound(quote);
                NewtonRaphsonSolver::new(self.config).find_root_bracketed(
                    |vol| {
                        let price = quote.price_at(vol);
                        trace!(vol, price, "newton iteration");
                        price - quote.market_price
                    },
                    |vol| quote.vega_at(vol),
                    initial_vol,
                    MIN_VOL,
                    upper,
                )?
            }
        };

        debug!(
            method = ?self.method,
            converged = outcome.is_converged(),
            vol = outcome.value(),
            iterations = outcome.iterations(),
            residual = outcome.residual(),
            "implied volatility solve finished"
        );

        Ok(outcome)
    }

    /// Like [`ImpliedVolSolver::solve`], but an exhausted budget is an error.
    ///
    /// # Errors
    /// Everything `solve` returns, plus `NotConverged`.
    pub fn solve_converged(
        &self,
        quote: &CallQuote,
        initial_vol: f64,
    ) -> Result<f64, AnalyticalError> {
        Ok(self.solve(quote, initial_vol)?.into_converged()?)
    }
}

/// Smallest `5 · 2ⁿ` whose price exceeds the market price, capped at
/// `MAX_VOL`. The call price rises monotonically towards S in σ.
fn newton_upper_bound(quote: &CallQuote) -> f64 {
    let mut upper = INITIAL_MAX_VOL;
    while upper < MAX_VOL && quote.price_at(upper) <= quote.market_price {
        upper *= 2.0;
    }
    upper.min(MAX_VOL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytical::black_scholes_call;
    use approx::assert_relative_eq;

    /// Regression value of the fixed-step rule for the reference quote.
    const REFERENCE_VOL: f64 = 0.18797167472798113;

    fn reference_quote() -> CallQuote {
        CallQuote::new(100.0, 100.0, 0.05, 1.0, 10.0)
    }

    fn round_trip_quote() -> CallQuote {
        let price = black_scholes_call(100.0, 100.0, 0.05, 1.0, 0.2);
        CallQuote::new(100.0, 100.0, 0.05, 1.0, price)
    }

    // ==========================================================
    // Permissive function
    // ==========================================================

    #[test]
    fn test_reference_scenario() {
        let vol = implied_volatility(100.0, 100.0, 0.05, 1.0, 10.0, 0.2, 1e-6, 1000);
        assert!(vol.is_finite());
        assert_relative_eq!(vol, REFERENCE_VOL, epsilon = 1e-8);
    }

    #[test]
    fn test_round_trip() {
        let price = black_scholes_call(100.0, 100.0, 0.05, 1.0, 0.2);
        let vol = implied_volatility(100.0, 100.0, 0.05, 1.0, price, 0.1, 1e-6, 1000);
        assert_relative_eq!(vol, 0.2, epsilon = 1e-4);
    }

    #[test]
    fn test_large_tolerance_returns_initial_guess() {
        let vol = implied_volatility(100.0, 100.0, 0.05, 1.0, 10.0, 0.35, 1.0, 1000);
        assert_eq!(vol, 0.35);
    }

    #[test]
    fn test_zero_budget_returns_initial_guess() {
        let vol = implied_volatility(100.0, 100.0, 0.05, 1.0, 10.0, 0.35, 1e-6, 0);
        assert_eq!(vol, 0.35);
    }

    #[test]
    fn test_exhaustion_matches_checked_solver() {
        let exhausted = implied_volatility(100.0, 100.0, 0.05, 1.0, 10.0, 0.1, 0.0, 50);
        let outcome = ImpliedVolSolver::new(SolverConfig::new(0.0, 50), UpdateMethod::default())
            .solve(&reference_quote(), 0.1)
            .unwrap();
        assert_eq!(exhausted, outcome.value());
    }

    #[test]
    fn test_update_order_is_bit_exact() {
        // Priced below intrinsic: the iterate never settles, so rounding
        // differences would accumulate over the whole budget
        let (s, k, r, t, price) = (100.0, 50.0, 0.05, 1.0, 30.0);
        let mut expected = 0.2_f64;
        for _ in 0..1000 {
            let miss = price - black_scholes_call(s, k, r, t, expected);
            expected += 0.1 * miss / s;
            if miss.abs() <= 1e-6 {
                break;
            }
        }

        let vol = implied_volatility(s, k, r, t, price, 0.2, 1e-6, 1000);
        assert_eq!(vol.to_bits(), expected.to_bits());
    }

    #[test]
    fn test_zero_initial_vol_is_nan() {
        // σ = 0 at the money with r = 0 prices to NaN, which ends the loop
        let vol = implied_volatility(100.0, 100.0, 0.0, 1.0, 10.0, 0.0, 1e-6, 1000);
        assert!(vol.is_nan());
    }

    #[test]
    fn test_negative_spot_is_nan() {
        let vol = implied_volatility(-100.0, 100.0, 0.05, 1.0, 10.0, 0.2, 1e-6, 1000);
        assert!(vol.is_nan());
    }

    // ==========================================================
    // Checked solver, fixed step
    // ==========================================================

    #[test]
    fn test_checked_reference_scenario() {
        let outcome = ImpliedVolSolver::default()
            .solve(&reference_quote(), 0.2)
            .unwrap();

        match outcome {
            SolverOutcome::Converged {
                value,
                iterations,
                residual,
            } => {
                assert_relative_eq!(value, REFERENCE_VOL, epsilon = 1e-8);
                assert_eq!(iterations, 343);
                assert!(residual <= 1e-6);
            }
            other => panic!("Expected Converged, got {:?}", other),
        }
    }

    #[test]
    fn test_checked_round_trip() {
        let vol = ImpliedVolSolver::default()
            .solve_converged(&round_trip_quote(), 0.1)
            .unwrap();
        assert_relative_eq!(vol, 0.2, epsilon = 1e-4);
    }

    #[test]
    fn test_unreachable_tolerance_uses_whole_budget() {
        let solver = ImpliedVolSolver::new(SolverConfig::new(0.0, 50), UpdateMethod::default());
        let outcome = solver.solve(&round_trip_quote(), 0.1).unwrap();

        match outcome {
            SolverOutcome::IterationLimitExceeded {
                iterations,
                residual,
                value,
            } => {
                assert_eq!(iterations, 50);
                assert!(residual > 0.0);
                assert!(value > 0.1 && value < 0.2);
            }
            other => panic!("Expected IterationLimitExceeded, got {:?}", other),
        }
    }

    #[test]
    fn test_solve_converged_reports_exhaustion() {
        let solver = ImpliedVolSolver::new(SolverConfig::new(0.0, 5), UpdateMethod::default());
        match solver.solve_converged(&reference_quote(), 0.2) {
            Err(AnalyticalError::NotConverged { iterations, .. }) => assert_eq!(iterations, 5),
            other => panic!("Expected NotConverged, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_zero_initial_vol() {
        let result = ImpliedVolSolver::default().solve(&reference_quote(), 0.0);
        assert_eq!(
            result,
            Err(AnalyticalError::InvalidVolatility { volatility: 0.0 })
        );
    }

    #[test]
    fn test_rejects_invalid_quote() {
        let quote = CallQuote {
            expiry: 0.0,
            ..reference_quote()
        };
        assert!(matches!(
            ImpliedVolSolver::default().solve(&quote, 0.2),
            Err(AnalyticalError::InvalidExpiry { .. })
        ));
    }

    #[test]
    fn test_rejects_invalid_settings() {
        let solver = ImpliedVolSolver::new(
            SolverConfig::default(),
            UpdateMethod::FixedStep { learning_rate: 0.0 },
        );
        assert!(matches!(
            solver.solve(&reference_quote(), 0.2),
            Err(AnalyticalError::InvalidSolverConfig { .. })
        ));

        let solver = ImpliedVolSolver::new(SolverConfig::new(-1.0, 10), UpdateMethod::default());
        assert!(matches!(
            solver.solve(&reference_quote(), 0.2),
            Err(AnalyticalError::InvalidSolverConfig { .. })
        ));
    }

    #[test]
    fn test_larger_learning_rate_converges_faster() {
        let slow = ImpliedVolSolver::default()
            .solve(&round_trip_quote(), 0.1)
            .unwrap();
        let fast = ImpliedVolSolver::new(
            SolverConfig::default(),
            UpdateMethod::FixedStep { learning_rate: 1.0 },
        )
        .solve(&round_trip_quote(), 0.1)
        .unwrap();

        assert!(fast.is_converged());
        assert!(fast.iterations() < slow.iterations());
    }

    // ==========================================================
    // Checked solver, Newton
    // ==========================================================

    #[test]
    fn test_newton_round_trip() {
        let solver = ImpliedVolSolver::new(SolverConfig::new(1e-6, 100), UpdateMethod::Newton);
        let outcome = solver.solve(&round_trip_quote(), 0.1).unwrap();

        assert!(outcome.is_converged());
        assert!(outcome.iterations() < 10);
        assert_relative_eq!(outcome.value(), 0.2, epsilon = 1e-7);
    }

    #[test]
    fn test_newton_matches_fixed_step_root() {
        let newton = ImpliedVolSolver::new(SolverConfig::new(1e-10, 100), UpdateMethod::Newton)
            .solve_converged(&reference_quote(), 0.2)
            .unwrap();
        assert_relative_eq!(newton, REFERENCE_VOL, epsilon = 1e-6);
    }

    #[test]
    fn test_newton_from_high_start_at_the_money() {
        let price = black_scholes_call(100.0, 100.0, 0.05, 1.0, 0.05);
        let quote = CallQuote::new(100.0, 100.0, 0.05, 1.0, price);
        let solver = ImpliedVolSolver::new(SolverConfig::new(1e-8, 100), UpdateMethod::Newton);

        let outcome = solver.solve(&quote, 3.0).unwrap();
        assert!(outcome.is_converged());
        assert_relative_eq!(outcome.value(), 0.05, epsilon = 1e-6);
    }

    #[test]
    fn test_newton_from_high_start_out_of_the_money() {
        let price = black_scholes_call(100.0, 130.0, 0.05, 1.0, 0.15);
        let quote = CallQuote::new(100.0, 130.0, 0.05, 1.0, price);
        let solver = ImpliedVolSolver::new(SolverConfig::new(1e-8, 100), UpdateMethod::Newton);

        let vol = solver.solve_converged(&quote, 3.0).unwrap();
        assert_relative_eq!(vol, 0.15, epsilon = 1e-6);
    }

    #[test]
    fn test_newton_iterates_stay_positive() {
        let price = black_scholes_call(100.0, 100.0, 0.05, 1.0, 0.05);
        let quote = CallQuote::new(100.0, 100.0, 0.05, 1.0, price);

        for budget in 1..20 {
            let solver = ImpliedVolSolver::new(SolverConfig::new(0.0, budget), UpdateMethod::Newton);
            let outcome = solver.solve(&quote, 3.0).unwrap();
            assert!(outcome.value() > 0.0, "σ = {} after {budget}", outcome.value());
        }
    }

    #[test]
    fn test_newton_upper_bound_brackets_high_vol() {
        let price = black_scholes_call(100.0, 100.0, 0.0, 1.0, 6.0);
        let quote = CallQuote::new(100.0, 100.0, 0.0, 1.0, price);
        let upper = newton_upper_bound(&quote);

        assert_eq!(upper, 10.0);
        let vol = ImpliedVolSolver::new(SolverConfig::new(1e-8, 100), UpdateMethod::Newton)
            .solve_converged(&quote, 0.2)
            .unwrap();
        assert_relative_eq!(vol, 6.0, epsilon = 1e-6);
    }

    #[test]
    fn test_rejects_price_below_intrinsic() {
        let quote = CallQuote::new(100.0, 50.0, 0.05, 1.0, 30.0);
        for method in [UpdateMethod::default(), UpdateMethod::Newton] {
            let result = ImpliedVolSolver::new(SolverConfig::default(), method).solve(&quote, 0.2);
            assert!(
                matches!(result, Err(AnalyticalError::InvalidMarketPrice { .. })),
                "{:?}: {:?}",
                method,
                result
            );
        }
    }

    #[test]
    fn test_default_method() {
        let solver = ImpliedVolSolver::default();
        assert_eq!(
            solver.method(),
            UpdateMethod::FixedStep {
                learning_rate: DEFAULT_LEARNING_RATE
            }
        );
        assert_eq!(solver.config().max_iterations, 1000);
    }

    #[test]
    fn test_solver_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ImpliedVolSolver>();
        assert_send_sync::<CallQuote>();
    }
}
