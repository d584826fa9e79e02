pub mod curve;
pub mod fees;
pub mod supply;

pub use curve::{CurveConfig, ExponentialCurve};
pub use fees::Fees;
