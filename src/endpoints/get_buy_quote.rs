// Import error handling
use crate::err::CurveError;
// Import math utilities
use crate::math::Decimal;
// Import curve and fee models
use crate::models::{curve::ExponentialCurve, fees::Fees};
// Import Anchor lang prelude
use anchor_lang::prelude::*;

/// Preview of spending USD on the curve.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BuyQuote {
    /// USD the user pays, fee included
    pub input: Decimal,
    /// Front-end fee taken from the input
    pub fee: Decimal,
    /// USD that reaches the curve
    pub net_input: Decimal,
    /// Tokens minted for `net_input`
    pub tokens_out: Decimal,
    /// `input / tokens_out`
    pub avg_price: Decimal,
    /// Price before the trade
    pub spot_price: Decimal,
    /// How far `avg_price` sits above `spot_price`, in percent
    pub price_impact_pct: Decimal,
    /// Buy fee rate applied, in basis points (0 when exempt)
    pub fee_bps: u16,
}

// Handler function for quoting a USD -> token buy
//
// # Arguments
// * `curve` - The bonding curve to price against
// * `fees` - Fee configuration
// * `supply` - Current circulating supply in whole tokens
// * `usd_in` - Amount of USD to spend, before the buy fee
// * `fee_exempt` - Skip the buy fee for this currency
pub fn handle(
    curve: &ExponentialCurve,
    fees: &Fees,
    supply: Decimal,
    usd_in: Decimal,
    fee_exempt: bool,
) -> Result<BuyQuote> {
    // Check that input amount is not zero
    if usd_in.is_zero() {
        return Err(error!(CurveError::InvalidAmount));
    }

    // Deduct the buy fee unless exempt
    let (net_input, fee) = fees.split_buy_input(usd_in, fee_exempt)?;

    // Convert what is left into tokens
    let tokens_out = curve.tokens_for_amount(supply, net_input)?;
    require!(!tokens_out.is_zero(), CurveError::InvalidAmount);

    let spot_price = curve.spot_price(supply)?;
    let avg_price = usd_in
        .checked_div(tokens_out)
        .ok_or_else(|| error!(CurveError::DomainOverflow))?;
    let price_impact_pct = percent_change(avg_price.saturating_sub(spot_price), spot_price)?;

    msg!(
        "Buy quote: {} USD -> {} tokens at supply {} (fee {})",
        usd_in,
        tokens_out,
        supply,
        fee
    );

    Ok(BuyQuote {
        input: usd_in,
        fee,
        net_input,
        tokens_out,
        avg_price,
        spot_price,
        price_impact_pct,
        fee_bps: if fee_exempt { 0 } else { fees.buy_fee_bps },
    })
}

/// `delta / base * 100`.
pub(crate) fn percent_change(delta: Decimal, base: Decimal) -> Result<Decimal> {
    delta
        .checked_mul_div(Decimal::from_u64(100), base)
        .ok_or_else(|| error!(CurveError::InvalidAmount))
}
