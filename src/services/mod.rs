pub mod mock_quote;
pub mod quote_cache;
pub mod quote_service;
pub mod symbol_search_service;

pub use mock_quote::{QuoteGenerator, RandomQuoteGenerator};
pub use quote_cache::QuoteCache;
pub use quote_service::QuoteService;
pub use symbol_search_service::SymbolSearchService;
