use crate::{
    consts::{MAX_TOKEN_SUPPLY, QUARKS_PER_TOKEN, TOKEN_DECIMALS, USDF_DECIMALS},
    err::CurveError,
    math::Decimal,
};
use anchor_lang::prelude::*;
use num_integer::Integer;

/// Convert quarks (smallest unit) to whole tokens
pub fn quarks_to_tokens(quarks: u64) -> Result<Decimal> {
    Decimal::from_base_units(quarks, TOKEN_DECIMALS).ok_or_else(|| error!(CurveError::DomainOverflow))
}

/// Convert whole tokens to quarks, flooring dust below one quark
pub fn tokens_to_quarks(tokens: Decimal) -> Result<u64> {
    tokens
        .to_base_units(TOKEN_DECIMALS)
        .ok_or_else(|| error!(CurveError::InvalidAmount))
}

/// Convert USDF base units to whole USDF
pub fn usdf_base_to_whole(base_units: u64) -> Result<Decimal> {
    Decimal::from_base_units(base_units, USDF_DECIMALS).ok_or_else(|| error!(CurveError::DomainOverflow))
}

/// Convert whole USDF to base units, flooring
pub fn usdf_whole_to_base(whole: Decimal) -> Result<u64> {
    whole
        .to_base_units(USDF_DECIMALS)
        .ok_or_else(|| error!(CurveError::InvalidAmount))
}

/// Tokens released from the reserve: `max_supply - vault / base_unit_scale`.
///
/// `base_unit_scale` is the number of base units per whole token and need
/// not be a power of ten.
pub fn circulating_supply(
    vault_base_units: u64,
    max_supply: u64,
    base_unit_scale: u64,
) -> Result<Decimal> {
    require!(base_unit_scale > 0, CurveError::InvalidAmount);

    let (whole, remainder) = vault_base_units.div_rem(&base_unit_scale);
    let vault_tokens = Decimal::from_ratio(remainder as u128, base_unit_scale as u128)
        .and_then(|fraction| fraction.checked_add(Decimal::from_u64(whole)))
        .ok_or_else(|| error!(CurveError::DomainOverflow))?;

    Decimal::from_u64(max_supply)
        .checked_sub(vault_tokens)
        .ok_or_else(|| error!(CurveError::InvalidAmount))
}

/// [`circulating_supply`] with the production supply and token decimals.
pub fn calculate_circulating_supply(vault_base_units: u64) -> Result<Decimal> {
    circulating_supply(vault_base_units, MAX_TOKEN_SUPPLY, QUARKS_PER_TOKEN)
}
