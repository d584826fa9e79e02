use anchor_lang::prelude::*;

#[error_code]
pub enum CurveError {
    #[msg("Amount must be positive and keep supply within the curve domain")]
    InvalidAmount,
    #[msg("Cannot sell more than circulating supply")]
    InsufficientSupply,
    #[msg("Exponent or logarithm argument outside the safe numeric range")]
    DomainOverflow,
}
