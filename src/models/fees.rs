use crate::{
    consts::{BPS_DENOMINATOR, BUY_FEE_BPS, SELL_FEE_BPS},
    err::CurveError,
    libraries::MulDiv,
    math::Decimal,
};
use anchor_lang::prelude::*;
use solana_program::pubkey::Pubkey;

#[derive(AnchorDeserialize, AnchorSerialize, Copy, Clone, Debug, Eq, PartialEq)]
pub struct Fees {
    /// Protocol fee taken from sell proceeds
    pub sell_fee_bps: u16,
    /// Front-end fee taken from the USD input of a buy
    pub buy_fee_bps: u16,
    /// Currency whose buys skip the buy fee
    pub exempt_mint: Option<Pubkey>,
}

impl Default for Fees {
    fn default() -> Self {
        Self {
            sell_fee_bps: SELL_FEE_BPS,
            buy_fee_bps: BUY_FEE_BPS,
            exempt_mint: None,
        }
    }
}

impl Fees {
    pub fn new(sell_fee_bps: u16, buy_fee_bps: u16) -> Result<Self> {
        check_bps(sell_fee_bps)?;
        check_bps(buy_fee_bps)?;
        Ok(Self {
            sell_fee_bps,
            buy_fee_bps,
            exempt_mint: None,
        })
    }

    pub fn with_exempt_mint(self, mint: Pubkey) -> Self {
        Self {
            exempt_mint: Some(mint),
            ..self
        }
    }

    pub fn is_fee_exempt(&self, mint: &Pubkey) -> bool {
        self.exempt_mint.as_ref() == Some(mint)
    }

    /// Buy fee on a USD input; zero when `fee_exempt`.
    pub fn get_buy_fee_amount(&self, amount: Decimal, fee_exempt: bool) -> Result<Decimal> {
        if fee_exempt {
            return Ok(Decimal::zero());
        }
        get_fee_amount(amount, self.buy_fee_bps)
    }

    /// Splits a USD input into `(net, fee)` with `net + fee == amount`.
    pub fn split_buy_input(&self, amount: Decimal, fee_exempt: bool) -> Result<(Decimal, Decimal)> {
        let fee = self.get_buy_fee_amount(amount, fee_exempt)?;
        let net = amount
            .checked_sub(fee)
            .ok_or_else(|| error!(CurveError::InvalidAmount))?;
        Ok((net, fee))
    }

    pub fn apply_sell_fee(&self, gross: Decimal) -> Result<Decimal> {
        deduct_bps(gross, self.sell_fee_bps)
    }

    /// Buy fee on an input already in base units, rounded up.
    pub fn get_buy_fee_base_units(&self, amount: u64, fee_exempt: bool) -> Result<u64> {
        if fee_exempt {
            return Ok(0);
        }
        amount
            .mul_div_ceil(self.buy_fee_bps as u64, BPS_DENOMINATOR as u64)
            .ok_or_else(|| error!(CurveError::DomainOverflow))
    }
}

/// `amount * bps / 10_000`, truncated.
pub fn get_fee_amount(amount: Decimal, bps: u16) -> Result<Decimal> {
    check_bps(bps)?;
    amount
        .checked_mul_bps(bps, BPS_DENOMINATOR)
        .ok_or_else(|| error!(CurveError::DomainOverflow))
}

/// `amount * (10_000 - bps) / 10_000`, truncated.
pub fn deduct_bps(amount: Decimal, bps: u16) -> Result<Decimal> {
    check_bps(bps)?;
    amount
        .checked_mul_bps(BPS_DENOMINATOR - bps, BPS_DENOMINATOR)
        .ok_or_else(|| error!(CurveError::DomainOverflow))
}

fn check_bps(bps: u16) -> Result<()> {
    require!(bps <= BPS_DENOMINATOR, CurveError::InvalidAmount);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_basic_fee_calculation() {
        // ARRANGE: Set up your test data
        let amount = dec("1000");
        let expected_fee = dec("10");

        // Call the function for testing
        let actual_fee = get_fee_amount(amount, SELL_FEE_BPS).unwrap();

        // Check if the result is what is expected
        assert_eq!(
            actual_fee, expected_fee,
            "Expected 1% fee of {} to be {}, but got {}",
            amount, expected_fee, actual_fee
        );
        assert!(
            actual_fee < amount,
            "Fee should always be less than original amount"
        );
    }

    #[test]
    fn test_buy_split_conserves_input() {
        let fees = Fees::default();
        let amount = dec("123.456789");

        let (net, fee) = fees.split_buy_input(amount, false).unwrap();

        assert_eq!(fee, dec("0.407407403700000000"));
        assert_eq!(net.checked_add(fee).unwrap(), amount);
    }

    #[test]
    fn test_exempt_currency_pays_no_buy_fee() {
        // ARRANGE: one configured exempt mint and one regular mint
        let exempt = Pubkey::new_unique();
        let regular = Pubkey::new_unique();
        let fees = Fees::default().with_exempt_mint(exempt);

        // ACT
        let exempt_split = fees
            .split_buy_input(dec("100"), fees.is_fee_exempt(&exempt))
            .unwrap();
        let regular_split = fees
            .split_buy_input(dec("100"), fees.is_fee_exempt(&regular))
            .unwrap();

        // ASSERT
        assert_eq!(exempt_split, (dec("100"), Decimal::zero()));
        assert_eq!(regular_split, (dec("99.67"), dec("0.33")));
    }

    #[test]
    fn test_no_mint_is_exempt_by_default() {
        let fees = Fees::default();
        assert!(!fees.is_fee_exempt(&Pubkey::new_unique()));
        assert!(!fees.is_fee_exempt(&Pubkey::default()));
    }

    #[test]
    fn test_sell_fee_default_is_one_percent() {
        let fees = Fees::default();
        assert_eq!(fees.apply_sell_fee(dec("500")).unwrap(), dec("495"));
        assert_eq!(deduct_bps(dec("500"), 0).unwrap(), dec("500"));
        assert_eq!(deduct_bps(dec("500"), 10_000).unwrap(), Decimal::zero());
    }

    #[test]
    fn test_base_unit_fee_rounds_up() {
        let fees = Fees::default();

        // 0.33% of 1 USDF (1_000_000 base units) is exactly 3_300
        assert_eq!(fees.get_buy_fee_base_units(1_000_000, false).unwrap(), 3_300);
        // 0.33% of 1_001 is 3.3033, charged as 4
        assert_eq!(fees.get_buy_fee_base_units(1_001, false).unwrap(), 4);
        assert_eq!(fees.get_buy_fee_base_units(1_001, true).unwrap(), 0);
    }

    #[test]
    #[should_panic(expected = "InvalidAmount")]
    fn test_fee_above_one_hundred_percent() {
        Fees::new(10_001, 0).unwrap();
    }
}
