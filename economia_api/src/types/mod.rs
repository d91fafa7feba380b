mod quote;
pub use self::quote::ExchangeQuote;
