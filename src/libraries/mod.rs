pub mod format;
pub mod mul_div;

pub use format::*;
pub use mul_div::MulDiv;
