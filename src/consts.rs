// Curve constants are stored the way the reserve program stores them:
// unsigned integers scaled by 10^18.
pub const CURVE_SCALE: u128 = 1_000_000_000_000_000_000;

// Default curve from $0.01 to $1_000_000 over 21_000_000 tokens
// R'(S) = a * b * e^(c * S)
pub const CURVE_A: u128 = 11400_230149967394933471;
pub const CURVE_B: u128 = 0_000000877175273521;
pub const CURVE_C: u128 = CURVE_B;

pub const MAX_TOKEN_SUPPLY: u64 = 21_000_000;

pub const TOKEN_DECIMALS: u8 = 10;
pub const QUARKS_PER_TOKEN: u64 = 10_000_000_000;

pub const USDF_DECIMALS: u8 = 6;

pub const BPS_DENOMINATOR: u16 = 10_000;
pub const SELL_FEE_BPS: u16 = 100; // 1%
pub const BUY_FEE_BPS: u16 = 33; // 0.33%

/// Halvings of `[0, max_supply]` used by the bisection lookups.
pub const SEARCH_ITERATIONS: usize = 50;

/// Reserve values (whole USD) used for milestone projections.
pub const RESERVE_MILESTONES: [u64; 6] = [100, 1_000, 10_000, 100_000, 1_000_000, 10_000_000];
