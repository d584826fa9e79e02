pub mod consts;
pub mod endpoints;
pub mod err;
pub mod libraries;
pub mod math;
pub mod models;

use anchor_lang::prelude::*;

pub use crate::endpoints::{BuyQuote, MilestoneProjection, SellQuote};
pub use crate::err::CurveError;
pub use crate::libraries::{format_milestone_label, format_percent, format_token_amount, format_usd};
pub use crate::math::Decimal;
pub use crate::models::supply::{
    calculate_circulating_supply, circulating_supply, quarks_to_tokens, tokens_to_quarks,
    usdf_base_to_whole, usdf_whole_to_base,
};
pub use crate::models::{CurveConfig, ExponentialCurve, Fees};

/// # Reserve Curve
///
/// Pricing engine for currencies issued against a USD reserve on an
/// exponential bonding curve:
/// - Spot price `R'(S) = a * b * e^(c * S)` from $0.01 to $1,000,000
/// - Reserve value, the closed-form integral of the price
/// - Buy and sell quotes with protocol and front-end fees
/// - Inverse lookups for milestone projections
///
/// The functions below price against the default curve. Use
/// [`ExponentialCurve`] directly for other parameters.
pub mod reserve_curve {
    use super::*;

    // ===== Curve Queries =====

    /// Spot price at the given circulating supply
    ///
    /// # Arguments
    /// * `supply` - Circulating supply in whole tokens (0..=21M)
    pub fn spot_price(supply: Decimal) -> Result<Decimal> {
        ExponentialCurve::default().spot_price(supply)
    }

    /// USD needed to mint tokens
    ///
    /// # Arguments
    /// * `supply` - Circulating supply before the buy
    /// * `tokens` - Tokens to mint
    pub fn cost_to_mint(supply: Decimal, tokens: Decimal) -> Result<Decimal> {
        ExponentialCurve::default().cost_to_mint(supply, tokens)
    }

    /// Tokens minted for a USD amount (no front-end fee)
    ///
    /// # Arguments
    /// * `supply` - Circulating supply before the buy
    /// * `usd_amount` - USD reaching the curve
    pub fn tokens_for_amount(supply: Decimal, usd_amount: Decimal) -> Result<Decimal> {
        ExponentialCurve::default().tokens_for_amount(supply, usd_amount)
    }

    /// USD received for selling tokens, after the sell fee
    ///
    /// # Arguments
    /// * `supply` - Circulating supply before the sell
    /// * `tokens` - Tokens to sell (must not exceed `supply`)
    /// * `fee_bps` - Sell fee in basis points (protocol default 100)
    pub fn sell_proceeds(supply: Decimal, tokens: Decimal, fee_bps: u16) -> Result<Decimal> {
        ExponentialCurve::default().sell_proceeds(supply, tokens, fee_bps)
    }

    // ===== Inverse Lookups =====

    /// Supply at which the reserve holds `target_reserve` USD
    pub fn supply_at_reserve_value(target_reserve: Decimal) -> Result<Decimal> {
        ExponentialCurve::default().supply_at_reserve_value(target_reserve)
    }

    /// Supply at which the spot price reaches `target_price`
    pub fn supply_at_price(target_price: Decimal) -> Result<Decimal> {
        ExponentialCurve::default().supply_at_price(target_price)
    }

    // ===== Quotes =====

    /// Preview a buy: USD in, tokens out, with the front-end fee
    ///
    /// # Arguments
    /// * `supply` - Circulating supply before the buy
    /// * `usd_in` - USD to spend, fee included
    /// * `fee_exempt` - Skip the buy fee (exempt currency)
    pub fn get_buy_quote(supply: Decimal, usd_in: Decimal, fee_exempt: bool) -> Result<BuyQuote> {
        endpoints::get_buy_quote::handle(
            &ExponentialCurve::default(),
            &Fees::default(),
            supply,
            usd_in,
            fee_exempt,
        )
    }

    /// Preview a sell: tokens in, USD out, with the protocol fee
    ///
    /// # Arguments
    /// * `supply` - Circulating supply before the sell
    /// * `tokens_in` - Tokens to sell
    pub fn get_sell_quote(supply: Decimal, tokens_in: Decimal) -> Result<SellQuote> {
        endpoints::get_sell_quote::handle(
            &ExponentialCurve::default(),
            &Fees::default(),
            supply,
            tokens_in,
        )
    }

    /// Value of a holding at the next `limit` reserve milestones
    pub fn get_milestones(
        holding: Decimal,
        current_reserve: Decimal,
        current_price: Decimal,
        limit: usize,
    ) -> Result<Vec<MilestoneProjection>> {
        endpoints::get_milestones::handle(
            &ExponentialCurve::default(),
            holding,
            current_reserve,
            current_price,
            limit,
        )
    }
}

pub use reserve_curve::*;
