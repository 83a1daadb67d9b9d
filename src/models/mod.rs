pub mod holding;
pub mod portfolio_summary;
pub mod quote;
pub mod symbol_match;

pub use holding::{Holding, PricedHolding};
pub use portfolio_summary::PortfolioSummary;
pub use quote::Quote;
pub use symbol_match::SymbolMatch;
