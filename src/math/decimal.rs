use crate::{err::CurveError, libraries::MulDiv};
use anchor_lang::prelude::*;
use spl_math::uint::U256;
use std::{fmt, str::FromStr};

/// Number of fractional digits carried by [`Decimal`].
pub const DECIMAL_PLACES: u32 = 18;

/// 10^18, the raw value of one whole unit.
pub const WAD: u128 = 1_000_000_000_000_000_000;

/// Non-negative fixed-point number with 18 fractional digits.
///
/// Every operation truncates toward zero, so chained buys and sells never
/// round in the caller's favour. Overflow and division by zero surface as
/// `None` from the `checked_*` family.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Decimal(U256);

impl Decimal {
    pub fn zero() -> Self {
        Self(U256::zero())
    }

    pub fn one() -> Self {
        Self(wad())
    }

    /// Wraps a raw value already scaled by 10^18.
    pub fn from_raw(raw: U256) -> Self {
        Self(raw)
    }

    /// Same as [`Decimal::from_raw`] for program-style `u128` constants.
    pub fn from_wad(raw: u128) -> Self {
        Self(U256::from(raw))
    }

    pub fn from_u64(value: u64) -> Self {
        Self(U256::from(value) * wad())
    }

    pub fn from_u128(value: u128) -> Option<Self> {
        U256::from(value).checked_mul(wad()).map(Self)
    }

    /// `num / denom`, truncated to 18 places.
    pub fn from_ratio(num: u128, denom: u128) -> Option<Self> {
        U256::from(num)
            .mul_div_floor(wad(), U256::from(denom))
            .map(Self)
    }

    /// Converts an integer amount of base units with `decimals` places.
    pub fn from_base_units(amount: u64, decimals: u8) -> Option<Self> {
        let scale = 10u128.checked_pow(decimals as u32)?;
        Self::from_ratio(amount as u128, scale)
    }

    /// Inverse of [`Decimal::from_base_units`], flooring any remainder.
    pub fn to_base_units(&self, decimals: u8) -> Option<u64> {
        let scale = U256::from(10u128.checked_pow(decimals as u32)?);
        let units = self.0.mul_div_floor(scale, wad())?;
        if units > U256::from(u64::MAX) {
            return None;
        }
        Some(units.low_u64())
    }

    /// Lossy conversion from a float. Negative and non-finite inputs are
    /// rejected rather than clamped.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        let whole = value.trunc();
        if whole >= u128::MAX as f64 {
            return None;
        }
        let fraction = ((value - whole) * WAD as f64) as u128;
        Self::from_u128(whole as u128)?.checked_add(Self::from_wad(fraction.min(WAD - 1)))
    }

    /// Lossy conversion to a float. Values past `u128` whole units map to
    /// infinity.
    pub fn to_f64(&self) -> f64 {
        let (whole, fraction) = self.0.div_mod(wad());
        if whole.bits() > 128 {
            return f64::INFINITY;
        }
        whole.low_u128() as f64 + fraction.low_u128() as f64 / WAD as f64
    }

    pub fn raw(&self) -> U256 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn checked_add(&self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_sub(&self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    pub fn saturating_sub(&self, rhs: Self) -> Self {
        self.checked_sub(rhs).unwrap_or_default()
    }

    pub fn checked_mul(&self, rhs: Self) -> Option<Self> {
        self.0.mul_div_floor(rhs.0, wad()).map(Self)
    }

    pub fn checked_div(&self, rhs: Self) -> Option<Self> {
        self.0.mul_div_floor(wad(), rhs.0).map(Self)
    }

    /// `self * num / denom` with a single truncation.
    pub fn checked_mul_div(&self, num: Self, denom: Self) -> Option<Self> {
        self.0.mul_div_floor(num.0, denom.0).map(Self)
    }

    /// Scales by a basis-point ratio: `self * bps / 10_000`.
    pub fn checked_mul_bps(&self, bps: u16, denominator: u16) -> Option<Self> {
        self.0
            .mul_div_floor(U256::from(bps), U256::from(denominator))
            .map(Self)
    }

    /// Midpoint of two values, used by the bisection lookups.
    pub fn midpoint(&self, other: Self) -> Option<Self> {
        self.checked_add(other).map(|sum| Self(sum.0 / U256::from(2)))
    }

    /// Integer part and the 18 fractional digits as a zero-padded string.
    pub fn split(&self) -> (U256, String) {
        let (whole, fraction) = self.0.div_mod(wad());
        (
            whole,
            format!("{:0>width$}", fraction.low_u128(), width = DECIMAL_PLACES as usize),
        )
    }

    /// Plain fixed-point rendering with exactly `places` digits, truncated.
    pub fn to_fixed(&self, places: usize) -> String {
        let (whole, mut fraction) = self.split();
        if places == 0 {
            return whole.to_string();
        }
        if places <= fraction.len() {
            fraction.truncate(places);
        } else {
            let padding = places - fraction.len();
            fraction.extend(std::iter::repeat('0').take(padding));
        }
        format!("{}.{}", whole, fraction)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (whole, fraction) = self.split();
        let fraction = fraction.trim_end_matches('0');
        if fraction.is_empty() {
            write!(f, "{}", whole)
        } else {
            write!(f, "{}.{}", whole, fraction)
        }
    }
}

impl FromStr for Decimal {
    type Err = Error;

    /// Parses `123`, `123.45` or `.5`. Digits past the 18th fractional place
    /// are truncated.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (whole, fraction) = s.split_once('.').unwrap_or((s, ""));
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        require!(
            !(whole.is_empty() && fraction.is_empty()) && all_digits(whole) && all_digits(fraction),
            CurveError::InvalidAmount
        );

        let whole = if whole.is_empty() {
            U256::zero()
        } else {
            U256::from_dec_str(whole).map_err(|_| error!(CurveError::InvalidAmount))?
        };

        let mut digits: String = fraction.chars().take(DECIMAL_PLACES as usize).collect();
        while digits.len() < DECIMAL_PLACES as usize {
            digits.push('0');
        }
        let fraction = U256::from_dec_str(&digits).map_err(|_| error!(CurveError::InvalidAmount))?;

        whole
            .checked_mul(wad())
            .and_then(|raw| raw.checked_add(fraction))
            .map(Self)
            .ok_or_else(|| error!(CurveError::DomainOverflow))
    }
}

fn wad() -> U256 {
    U256::from(WAD)
}
