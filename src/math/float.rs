//! The only place where the curve touches native floating point.
//!
//! Exponent and logarithm arguments are small (the curve constants keep
//! `c * S` below ~18.5 over the whole supply range), so `f64::exp` and
//! `f64::ln` are precise enough. Inputs and outputs cross this boundary as
//! [`Decimal`] so everything around it stays in fixed point.

use crate::{err::CurveError, math::decimal::Decimal};
use anchor_lang::prelude::*;

/// Largest exponent accepted by [`exp_decimal`]. `e^88` is ~1.6e38, the
/// top of what the fixed-point representation can hold as whole units.
pub const MAX_EXP_ARGUMENT: f64 = 88.0;

/// `e^x` for a fixed-point exponent.
pub fn exp_decimal(x: Decimal) -> Result<Decimal> {
    let arg = x.to_f64();
    require!(
        arg.is_finite() && arg <= MAX_EXP_ARGUMENT,
        CurveError::DomainOverflow
    );

    let value = arg.exp();
    require!(value.is_finite(), CurveError::DomainOverflow);

    Decimal::from_f64(value).ok_or_else(|| error!(CurveError::DomainOverflow))
}

/// `ln(x)` for `x >= 1`, the only range the curve inverses evaluate.
pub fn ln_decimal(x: Decimal) -> Result<Decimal> {
    require!(x >= Decimal::one(), CurveError::DomainOverflow);

    let arg = x.to_f64();
    require!(arg.is_finite(), CurveError::DomainOverflow);

    let value = arg.ln();
    require!(value.is_finite() && value >= 0.0, CurveError::DomainOverflow);

    Decimal::from_f64(value).ok_or_else(|| error!(CurveError::DomainOverflow))
}

/// `e^x - 1`, keeping full precision when `x` is tiny.
pub fn exp_m1_decimal(x: Decimal) -> Result<Decimal> {
    let arg = x.to_f64();
    require!(
        arg.is_finite() && arg <= MAX_EXP_ARGUMENT,
        CurveError::DomainOverflow
    );

    let value = arg.exp_m1();
    require!(value.is_finite(), CurveError::DomainOverflow);

    Decimal::from_f64(value).ok_or_else(|| error!(CurveError::DomainOverflow))
}

/// `ln(1 + x)`, keeping full precision when `x` is tiny.
pub fn ln_1p_decimal(x: Decimal) -> Result<Decimal> {
    let arg = x.to_f64();
    require!(arg.is_finite(), CurveError::DomainOverflow);

    let value = arg.ln_1p();
    require!(value.is_finite() && value >= 0.0, CurveError::DomainOverflow);

    Decimal::from_f64(value).ok_or_else(|| error!(CurveError::DomainOverflow))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_exp_and_ln_agree() {
        let x = dec("8.25");

        let e = exp_decimal(x).unwrap();
        let back = ln_decimal(e).unwrap();

        let diff = (back.to_f64() - x.to_f64()).abs();
        assert!(diff < 1e-12, "ln(exp(x)) drifted by {}", diff);
    }

    #[test]
    fn test_exp_of_zero_is_one() {
        assert_eq!(exp_decimal(Decimal::zero()).unwrap(), Decimal::one());
        assert_eq!(ln_decimal(Decimal::one()).unwrap(), Decimal::zero());
    }

    #[test]
    fn test_exp_rejects_large_arguments() {
        let result = exp_decimal(Decimal::from_u64(1_000));
        assert_eq!(result.unwrap_err(), Error::from(CurveError::DomainOverflow));
    }

    #[test]
    #[should_panic(expected = "DomainOverflow")]
    fn test_ln_rejects_values_below_one() {
        ln_decimal(dec("0.5")).unwrap();
    }

    #[test]
    fn test_small_arguments_keep_precision() {
        // ARRANGE: an exponent the size of a sub-token trade at high supply
        let x = dec("0.000000000877175273");

        // ACT
        let grown = exp_m1_decimal(x).unwrap();
        let back = ln_1p_decimal(grown).unwrap();

        // ASSERT: both sides stay within a few raw units of x
        let rel = (grown.to_f64() - x.to_f64()).abs() / x.to_f64();
        assert!(rel < 1e-8, "e^x - 1 drifted by {}", rel);
        let rel = (back.to_f64() - x.to_f64()).abs() / x.to_f64();
        assert!(rel < 1e-8, "ln(1 + x) drifted by {}", rel);
    }

    #[test]
    fn test_exp_m1_matches_exp_for_large_arguments() {
        let x = dec("12.5");

        let direct = exp_decimal(x).unwrap().checked_sub(Decimal::one()).unwrap();
        let shifted = exp_m1_decimal(x).unwrap();

        assert!((direct.to_f64() - shifted.to_f64()).abs() / direct.to_f64() < 1e-12);
        assert_eq!(exp_m1_decimal(Decimal::zero()).unwrap(), Decimal::zero());
        assert_eq!(ln_1p_decimal(Decimal::zero()).unwrap(), Decimal::zero());
    }

    #[test]
    #[should_panic(expected = "DomainOverflow")]
    fn test_exp_m1_rejects_large_arguments() {
        exp_m1_decimal(Decimal::from_u64(1_000)).unwrap();
    }
}
