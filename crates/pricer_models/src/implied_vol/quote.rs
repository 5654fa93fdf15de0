//! Observed call quote.

use crate::analytical::{black_scholes_call, black_scholes_vega, AnalyticalError};
use crate::analytical::validate;

/// One observed European call quote: market state, contract terms and price.
///
/// # Examples
/// ```
/// use pricer_models::implied_vol::CallQuote;
///
/// let quote = CallQuote::new(100.0, 100.0, 0.05, 1.0, 10.0);
/// assert!(quote.validate().is_ok());
/// assert!((quote.price_at(0.2) - 10.450583572185565).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CallQuote {
    /// Underlying price (S)
    pub spot: f64,
    /// Strike price (K)
    pub strike: f64,
    /// Continuously compounded risk-free rate (r)
    pub rate: f64,
    /// Time to expiration in years (T)
    pub expiry: f64,
    /// Observed option price
    pub market_price: f64,
}

impl CallQuote {
    /// Creates a quote without validation.
    pub fn new(spot: f64, strike: f64, rate: f64, expiry: f64, market_price: f64) -> Self {
        Self {
            spot,
            strike,
            rate,
            expiry,
            market_price,
        }
    }

    /// Checks the quote can be inverted.
    ///
    /// S, K and T must be positive and finite, r finite, and the market
    /// price strictly inside `((S − K·e^(−rT))⁺, S)`. The call price tends to
    /// the lower bound as σ → 0 and to S as σ → ∞, so only prices in this
    /// open interval have an implied volatility.
    ///
    /// # Errors
    /// The `AnalyticalError::Invalid*` variant naming the first bad field.
    pub fn validate(&self) -> Result<(), AnalyticalError> {
        validate::spot(self.spot)?;
        validate::strike(self.strike)?;
        validate::rate(self.rate)?;
        validate::expiry(self.expiry)?;

        let lower = self.intrinsic_value();
        let price = self.market_price;
        if !(price.is_finite() && price > lower && price < self.spot) {
            return Err(AnalyticalError::InvalidMarketPrice {
                price,
                lower,
                upper: self.spot,
            });
        }
        Ok(())
    }

    /// Discounted intrinsic value `(S − K·e^(−rT))⁺`, the σ → 0 limit of
    /// the call price.
    pub fn intrinsic_value(&self) -> f64 {
        (self.spot - self.strike * (-self.rate * self.expiry).exp()).max(0.0)
    }

    /// Model price of this contract at `volatility`.
    #[inline]
    pub fn price_at(&self, volatility: f64) -> f64 {
        black_scholes_call(self.spot, self.strike, self.rate, self.expiry, volatility)
    }

    /// Vega of this contract at `volatility`.
    #[inline]
    pub fn vega_at(&self, volatility: f64) -> f64 {
        black_scholes_vega(self.spot, self.strike, self.rate, self.expiry, volatility)
    }
}
