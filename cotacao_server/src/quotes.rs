//! Fetch-then-persist flow behind `GET /cotacao`.

use std::time::Duration;

use economia_api::{Client, CurrencyPair};

use crate::config::Config;
use crate::deadline::Deadline;
use crate::error::QuoteError;
use crate::persist::{PersistError, QuoteStore};
use crate::ExchangeQuote;

/// A quote obtained from upstream together with the outcome of storing it.
#[derive(Debug)]
pub struct Fetched {
    pub quote: ExchangeQuote,
    pub persisted: Result<(), PersistError>,
}

pub struct QuoteService {
    client: Client,
    pair: CurrencyPair,
    store: QuoteStore,
    upstream_timeout: Duration,
    db_timeout: Duration,
}

impl QuoteService {
    pub fn new(
        client: Client,
        pair: CurrencyPair,
        store: QuoteStore,
        upstream_timeout: Duration,
        db_timeout: Duration,
    ) -> Self {
        Self {
            client,
            pair,
            store,
            upstream_timeout,
            db_timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Client::with_base_url(&config.upstream_url),
            config.pair.clone(),
            QuoteStore::new(&config.db_path),
            config.upstream_timeout,
            config.db_timeout,
        )
    }

    pub fn pair(&self) -> &CurrencyPair {
        &self.pair
    }

    /// Fetches the latest quote and appends it to the store.
    ///
    /// Upstream and decode failures are errors. A failed or timed out insert
    /// is not: the quote is still returned with the failure in `persisted`.
    /// Only the upstream call is cut off by `deadline`; the insert gets its
    /// own clamped leg.
    pub async fn fetch(&self, deadline: &Deadline) -> Result<Fetched, QuoteError> {
        let upstream_timeout = deadline
            .leg(self.upstream_timeout)
            .ok_or(QuoteError::DeadlineExceeded)?;
        let quote = deadline
            .run(self.client.get_last_quote(&self.pair, upstream_timeout))
            .await
            .map_err(|_| QuoteError::DeadlineExceeded)??;

        let persisted = match deadline.leg(self.db_timeout) {
            Some(db_timeout) => self.store.persist(quote.clone(), db_timeout).await,
            None => Err(PersistError::DeadlineExceeded),
        };

        Ok(Fetched { quote, persisted })
    }
}
