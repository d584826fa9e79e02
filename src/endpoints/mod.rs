pub use get_buy_quote::BuyQuote;
pub use get_milestones::{next_milestone, MilestoneProjection};
pub use get_sell_quote::SellQuote;

pub mod get_buy_quote;
pub mod get_milestones;
pub mod get_sell_quote;
