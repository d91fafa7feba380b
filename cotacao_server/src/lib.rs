//! Quote relay server: fetches the latest USD-BRL quote from AwesomeAPI,
//! appends it to a local SQLite table and answers `GET /cotacao` with the bid.
//!
//! Every request runs under a [`deadline::Deadline`]; the upstream call and
//! the database insert each get a sub-deadline clamped to what is left of it.

pub mod api;
pub mod config;
pub mod db;
pub mod deadline;
pub mod error;
pub mod persist;
pub mod quotes;

pub use economia_api;
pub use economia_api::types::ExchangeQuote;

pub use api::{app_router, AppState, BidResponse};
pub use config::{Config, LogFormat};
pub use db::{Db, DbError};
pub use deadline::Deadline;
pub use error::QuoteError;
pub use persist::{PersistError, QuoteStore};
pub use quotes::{Fetched, QuoteService};
