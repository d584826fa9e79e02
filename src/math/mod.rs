pub mod decimal;
pub mod float;

pub use decimal::Decimal;
pub use float::{exp_decimal, exp_m1_decimal, ln_1p_decimal, ln_decimal};
