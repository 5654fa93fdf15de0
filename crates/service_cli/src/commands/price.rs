//! Price command implementation
//!
//! Prices a European call with the checked Black-Scholes model.

use std::io::Write;

use pricer_models::analytical::BlackScholes;
use serde::Serialize;
use tracing::info;

use super::OutputFormat;
use crate::Result;

/// Contract and market inputs for `impvol price`
#[derive(Debug, Clone, Copy)]
pub struct PriceRequest {
    pub spot: f64,
    pub strike: f64,
    pub rate: f64,
    pub expiry: f64,
    pub volatility: f64,
}

#[derive(Debug, Serialize)]
struct PriceReport {
    model: BlackScholes,
    strike: f64,
    expiry: f64,
    price: f64,
    vega: f64,
}

/// Run the price command
pub fn run<W: Write>(request: &PriceRequest, format: OutputFormat, out: &mut W) -> Result<()> {
    info!(
        spot = request.spot,
        strike = request.strike,
        rate = request.rate,
        expiry = request.expiry,
        volatility = request.volatility,
        "Pricing call"
    );

    let model = BlackScholes::new(request.spot, request.rate, request.volatility)?;
    let price = model.price_call(request.strike, request.expiry)?;

    match format {
        OutputFormat::Text => writeln!(out, "Call Price: {}", price)?,
        OutputFormat::Json => {
            let report = PriceReport {
                model,
                strike: request.strike,
                expiry: request.expiry,
                price,
                vega: model.vega(request.strike, request.expiry)?,
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        }
    }

    Ok(())
}
