//! Input validation helpers.
//!
//! `!is_finite()` rejects NaN, +Inf and -Inf uniformly.

use super::error::AnalyticalError;

/// Strictly positive and finite.
#[inline]
pub(crate) fn is_positive_finite(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

pub(crate) fn spot(spot: f64) -> Result<f64, AnalyticalError> {
    if is_positive_finite(spot) {
        Ok(spot)
    } else {
        Err(AnalyticalError::InvalidSpot { spot })
    }
}

pub(crate) fn strike(strike: f64) -> Result<f64, AnalyticalError> {
    if is_positive_finite(strike) {
        Ok(strike)
    } else {
        Err(AnalyticalError::InvalidStrike { strike })
    }
}

pub(crate) fn expiry(expiry: f64) -> Result<f64, AnalyticalError> {
    if is_positive_finite(expiry) {
        Ok(expiry)
    } else {
        Err(AnalyticalError::InvalidExpiry { expiry })
    }
}

pub(crate) fn volatility(volatility: f64) -> Result<f64, AnalyticalError> {
    if is_positive_finite(volatility) {
        Ok(volatility)
    } else {
        Err(AnalyticalError::InvalidVolatility { volatility })
    }
}

/// Rates may be zero or negative.
pub(crate) fn rate(rate: f64) -> Result<f64, AnalyticalError> {
    if rate.is_finite() {
        Ok(rate)
    } else {
        Err(AnalyticalError::InvalidRate { rate })
    }
}
