// Import error handling
use crate::err::CurveError;
// Import math utilities
use crate::math::Decimal;
// Import curve and fee models
use crate::models::{curve::ExponentialCurve, fees::Fees};
// Import shared percent helper
use super::get_buy_quote::percent_change;
// Import Anchor lang prelude
use anchor_lang::prelude::*;

/// Preview of selling tokens back into the reserve.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SellQuote {
    /// Tokens sold
    pub input: Decimal,
    /// USD released by the curve before the sell fee
    pub gross: Decimal,
    /// Sell fee kept by the protocol
    pub fee: Decimal,
    /// USD the user receives
    pub proceeds: Decimal,
    /// `proceeds / input`
    pub avg_price: Decimal,
    /// Price before the trade
    pub spot_price: Decimal,
    /// How far `avg_price` sits below `spot_price`, in percent
    pub price_impact_pct: Decimal,
}

// Handler function for quoting a token -> USD sell
//
// # Arguments
// * `curve` - The bonding curve to price against
// * `fees` - Fee configuration (sell fee is applied)
// * `supply` - Current circulating supply in whole tokens
// * `tokens_in` - Amount of tokens to sell
pub fn handle(
    curve: &ExponentialCurve,
    fees: &Fees,
    supply: Decimal,
    tokens_in: Decimal,
) -> Result<SellQuote> {
    // Check that input amount is not zero
    if tokens_in.is_zero() {
        return Err(error!(CurveError::InvalidAmount));
    }

    // Value of the unwound interval, then the protocol fee
    let gross = curve.sell_value(supply, tokens_in)?;
    let proceeds = fees.apply_sell_fee(gross)?;
    let fee = gross.saturating_sub(proceeds);

    let spot_price = curve.spot_price(supply)?;
    let avg_price = proceeds
        .checked_div(tokens_in)
        .ok_or_else(|| error!(CurveError::DomainOverflow))?;
    let price_impact_pct = percent_change(spot_price.saturating_sub(avg_price), spot_price)?;

    msg!(
        "Sell quote: {} tokens -> {} USD at supply {} (fee {})",
        tokens_in,
        proceeds,
        supply,
        fee
    );

    Ok(SellQuote {
        input: tokens_in,
        gross,
        fee,
        proceeds,
        avg_price,
        spot_price,
        price_impact_pct,
    })
}
