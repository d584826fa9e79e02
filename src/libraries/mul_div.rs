use num_integer::Integer;
use spl_math::uint::U256;
use uint::construct_uint;

construct_uint! {
    /// Intermediate width for `U256 * U256` products.
    pub struct U512(8);
}

/// Multiply then divide without losing the high bits of the product.
pub trait MulDiv<RHS = Self> {
    type Output;

    fn mul_div_floor(self, num: RHS, denom: RHS) -> Option<Self::Output>;
    fn mul_div_ceil(self, num: RHS, denom: RHS) -> Option<Self::Output>;
}

impl MulDiv for U256 {
    type Output = U256;

    fn mul_div_floor(self, num: Self, denom: Self) -> Option<Self::Output> {
        if denom.is_zero() {
            return None;
        }
        let product = widen(self).checked_mul(widen(num))?;
        narrow(product / widen(denom))
    }

    fn mul_div_ceil(self, num: Self, denom: Self) -> Option<Self::Output> {
        if denom.is_zero() {
            return None;
        }
        let product = widen(self).checked_mul(widen(num))?;
        let (quotient, remainder) = product.div_mod(widen(denom));
        let quotient = if remainder.is_zero() {
            quotient
        } else {
            quotient.checked_add(U512::one())?
        };
        narrow(quotient)
    }
}

impl MulDiv for u64 {
    type Output = u64;

    fn mul_div_floor(self, num: Self, denom: Self) -> Option<Self::Output> {
        if denom == 0 {
            return None;
        }
        let product = (self as u128).checked_mul(num as u128)?;
        u64::try_from(product / denom as u128).ok()
    }

    fn mul_div_ceil(self, num: Self, denom: Self) -> Option<Self::Output> {
        if denom == 0 {
            return None;
        }
        let product = (self as u128).checked_mul(num as u128)?;
        let (quotient, remainder) = product.div_rem(&(denom as u128));
        let quotient = if remainder == 0 { quotient } else { quotient + 1 };
        u64::try_from(quotient).ok()
    }
}

fn widen(value: U256) -> U512 {
    let U256(words) = value;
    U512([words[0], words[1], words[2], words[3], 0, 0, 0, 0])
}

fn narrow(value: U512) -> Option<U256> {
    let U512(words) = value;
    if words[4..].iter().any(|word| *word != 0) {
        return None;
    }
    Some(U256([words[0], words[1], words[2], words[3]]))
}
