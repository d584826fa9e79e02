/// Import necessary modules from crate
use crate::{
    consts::{CURVE_A, CURVE_B, CURVE_C, MAX_TOKEN_SUPPLY, SEARCH_ITERATIONS},
    err::CurveError,
    math::{exp_decimal, exp_m1_decimal, ln_1p_decimal, ln_decimal, Decimal},
};

/// Import Anchor lang prelude for errors and serialization derives
use anchor_lang::prelude::*;

/// Import fee helpers for sell proceeds
use super::fees::deduct_bps;

/// Raw curve parameters, scaled by 10^18 the way the reserve program
/// stores them.
#[derive(AnchorDeserialize, AnchorSerialize, Copy, Clone, Debug, Eq, PartialEq)]
pub struct CurveConfig {
    /// Price scale (a)
    pub a: u128,
    /// Price multiplier (b); `a * b` is the price at zero supply
    pub b: u128,
    /// Growth rate of the exponent (c)
    pub c: u128,
    /// Maximum issuable supply in whole tokens
    pub max_supply: u64,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            a: CURVE_A,
            b: CURVE_B,
            c: CURVE_C,
            max_supply: MAX_TOKEN_SUPPLY,
        }
    }
}

/// Exponential bonding curve `R'(S) = a * b * e^(c * S)`.
///
/// Supplies are whole tokens and prices/reserves are USD. Every method is a
/// pure function of its arguments.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ExponentialCurve {
    a: Decimal,
    b: Decimal,
    c: Decimal,
    max_supply: Decimal,
}

impl Default for ExponentialCurve {
    fn default() -> Self {
        Self::from_config(CurveConfig::default())
    }
}

impl ExponentialCurve {
    pub fn new(config: CurveConfig) -> Result<Self> {
        require!(
            config.a > 0 && config.b > 0 && config.c > 0 && config.max_supply > 0,
            CurveError::InvalidAmount
        );
        Ok(Self::from_config(config))
    }

    fn from_config(config: CurveConfig) -> Self {
        Self {
            a: Decimal::from_wad(config.a),
            b: Decimal::from_wad(config.b),
            c: Decimal::from_wad(config.c),
            max_supply: Decimal::from_u64(config.max_supply),
        }
    }

    pub fn max_supply(&self) -> Decimal {
        self.max_supply
    }

    /// Spot price at a given circulating supply
    ///
    /// Formula: R'(S) = a * b * e^(c * S)
    pub fn spot_price(&self, supply: Decimal) -> Result<Decimal> {
        self.check_supply(supply)?;

        let exp_term = self.exp_c_times(supply)?;
        self.ab()?
            .checked_mul(exp_term)
            .ok_or_else(|| error!(CurveError::DomainOverflow))
    }

    /// USD needed to mint `tokens` starting at `supply`
    ///
    /// Formula: (a * b / c) * (e^(c * S1) - e^(c * S0)),
    /// evaluated as (a * b / c) * e^(c * S0) * (e^(c * dS) - 1)
    pub fn cost_to_mint(&self, supply: Decimal, tokens: Decimal) -> Result<Decimal> {
        if tokens.is_zero() {
            return Ok(Decimal::zero());
        }

        let new_supply = supply
            .checked_add(tokens)
            .ok_or_else(|| error!(CurveError::InvalidAmount))?;
        self.check_supply(new_supply)?;

        let exponent = self
            .c
            .checked_mul(tokens)
            .ok_or_else(|| error!(CurveError::DomainOverflow))?;
        let growth = exp_m1_decimal(exponent)?;

        self.reserve_scale_at(supply)?
            .checked_mul(growth)
            .ok_or_else(|| error!(CurveError::DomainOverflow))
    }

    /// Reserve value backing `supply` tokens, the integral of the price
    /// from zero.
    pub fn reserve_at(&self, supply: Decimal) -> Result<Decimal> {
        self.cost_to_mint(Decimal::zero(), supply)
    }

    /// Tokens received for spending `amount` USD starting at `supply`
    ///
    /// Formula: (1 / c) * ln(amount / (a * b / c) + e^(c * S0)) - S0,
    /// evaluated as (1 / c) * ln(1 + amount / ((a * b / c) * e^(c * S0)))
    ///
    /// A zero amount buys exactly zero tokens. A buy that would push supply
    /// past the maximum is rejected.
    pub fn tokens_for_amount(&self, supply: Decimal, amount: Decimal) -> Result<Decimal> {
        self.check_supply(supply)?;
        if amount.is_zero() {
            return Ok(Decimal::zero());
        }

        let tokens = self.tokens_after_spending(supply, amount)?;
        let new_supply = supply
            .checked_add(tokens)
            .ok_or_else(|| error!(CurveError::InvalidAmount))?;
        require!(new_supply <= self.max_supply, CurveError::InvalidAmount);

        Ok(tokens)
    }

    /// USD value released by unwinding `tokens` from `supply`, before fees.
    pub fn sell_value(&self, supply: Decimal, tokens: Decimal) -> Result<Decimal> {
        self.check_supply(supply)?;

        let new_supply = supply
            .checked_sub(tokens)
            .ok_or_else(|| error!(CurveError::InsufficientSupply))?;

        self.cost_to_mint(new_supply, tokens)
    }

    /// USD received when selling `tokens` at `supply`, after a `fee_bps` fee.
    pub fn sell_proceeds(&self, supply: Decimal, tokens: Decimal, fee_bps: u16) -> Result<Decimal> {
        let gross = self.sell_value(supply, tokens)?;
        deduct_bps(gross, fee_bps)
    }

    /// Spot price times circulating supply.
    pub fn market_cap(&self, supply: Decimal) -> Result<Decimal> {
        self.spot_price(supply)?
            .checked_mul(supply)
            .ok_or_else(|| error!(CurveError::DomainOverflow))
    }

    /// Supply at which the reserve reaches `target`, clamped to
    /// `[0, max_supply]`.
    pub fn supply_at_reserve_value(&self, target: Decimal) -> Result<Decimal> {
        if target.is_zero() {
            return Ok(Decimal::zero());
        }
        if target >= self.reserve_at(self.max_supply)? {
            return Ok(self.max_supply);
        }

        let supply = self.tokens_after_spending(Decimal::zero(), target)?;
        Ok(supply.min(self.max_supply))
    }

    /// Supply at which the spot price reaches `target`, clamped to
    /// `[0, max_supply]`.
    ///
    /// Formula: S = ln(target / (a * b)) / c
    pub fn supply_at_price(&self, target: Decimal) -> Result<Decimal> {
        let floor = self.ab()?;
        if target <= floor {
            return Ok(Decimal::zero());
        }

        let ratio = target
            .checked_div(floor)
            .ok_or_else(|| error!(CurveError::DomainOverflow))?;
        let supply = ln_decimal(ratio)?
            .checked_div(self.c)
            .ok_or_else(|| error!(CurveError::DomainOverflow))?;

        Ok(supply.min(self.max_supply))
    }

    /// Bisection counterpart of [`ExponentialCurve::supply_at_reserve_value`].
    pub fn search_supply_at_reserve_value(&self, target: Decimal) -> Result<Decimal> {
        self.bisect(target, |supply| self.reserve_at(supply))
    }

    /// Bisection counterpart of [`ExponentialCurve::supply_at_price`].
    pub fn search_supply_at_price(&self, target: Decimal) -> Result<Decimal> {
        self.bisect(target, |supply| self.spot_price(supply))
    }

    /// Halves `[0, max_supply]` a fixed number of times looking for the
    /// point where the increasing `value_at` crosses `target`.
    fn bisect<F>(&self, target: Decimal, value_at: F) -> Result<Decimal>
    where
        F: Fn(Decimal) -> Result<Decimal>,
    {
        let mut low = Decimal::zero();
        let mut high = self.max_supply;

        for _ in 0..SEARCH_ITERATIONS {
            let mid = midpoint(low, high)?;
            if value_at(mid)? < target {
                low = mid;
            } else {
                high = mid;
            }
        }

        midpoint(low, high)
    }

    /// Tokens minted by `amount` from `supply`, without the domain check.
    fn tokens_after_spending(&self, supply: Decimal, amount: Decimal) -> Result<Decimal> {
        let ratio = amount
            .checked_div(self.reserve_scale_at(supply)?)
            .ok_or_else(|| error!(CurveError::DomainOverflow))?;

        ln_1p_decimal(ratio)?
            .checked_div(self.c)
            .ok_or_else(|| error!(CurveError::DomainOverflow))
    }

    // (a * b / c) * e^(c * S), the reserve-per-unit-growth at a supply point
    fn reserve_scale_at(&self, supply: Decimal) -> Result<Decimal> {
        let exp_s = self.exp_c_times(supply)?;
        self.ab_over_c()?
            .checked_mul(exp_s)
            .ok_or_else(|| error!(CurveError::DomainOverflow))
    }

    fn exp_c_times(&self, supply: Decimal) -> Result<Decimal> {
        let exponent = self
            .c
            .checked_mul(supply)
            .ok_or_else(|| error!(CurveError::DomainOverflow))?;
        exp_decimal(exponent)
    }

    fn ab(&self) -> Result<Decimal> {
        self.a
            .checked_mul(self.b)
            .ok_or_else(|| error!(CurveError::DomainOverflow))
    }

    // Single truncation, so a * b / c is exactly a when b == c
    fn ab_over_c(&self) -> Result<Decimal> {
        self.a
            .checked_mul_div(self.b, self.c)
            .ok_or_else(|| error!(CurveError::DomainOverflow))
    }

    fn check_supply(&self, supply: Decimal) -> Result<()> {
        require!(supply <= self.max_supply, CurveError::InvalidAmount);
        Ok(())
    }
}

fn midpoint(low: Decimal, high: Decimal) -> Result<Decimal> {
    low.midpoint(high)
        .ok_or_else(|| error!(CurveError::DomainOverflow))
}
