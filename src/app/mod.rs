pub mod calc;
pub mod portfolio;
pub mod utils;

pub use portfolio::Portfolio;
