//! Per-request persistence of fetched quotes.
//!
//! Each call opens its own connection on the blocking pool, ensures the
//! table exists and appends one row, all within the caller's timeout. Once
//! the timeout elapses the write is cancelled: the blocking task may still
//! be waiting on a lock, but it rolls back instead of committing.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::db::{Db, DbError};
use crate::ExchangeQuote;

#[derive(thiserror::Error, Debug)]
pub enum PersistError {
    #[error("database error: {0}")]
    Db(#[from] DbError),
    #[error("write did not finish within {0:?}")]
    Timeout(Duration),
    #[error("write was cancelled before it committed")]
    Cancelled,
    #[error("request deadline passed before the write started")]
    DeadlineExceeded,
    #[error("database task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Writes quotes to the SQLite file at `path`.
#[derive(Clone, Debug)]
pub struct QuoteStore {
    path: PathBuf,
}

impl QuoteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn persist(&self, quote: ExchangeQuote, timeout: Duration) -> Result<(), PersistError> {
        let cancelled = Arc::new(AtomicBool::new(false));
        let _cancel = CancelOnDrop(Arc::clone(&cancelled));

        let path = self.path.clone();
        let write = tokio::task::spawn_blocking(move || write_quote(&path, &quote, &cancelled));

        match tokio::time::timeout(timeout, write).await {
            Ok(joined) => {
                joined??;
                tracing::info!("quote stored in {}", self.path().display());
                Ok(())
            }
            Err(_) => {
                tracing::warn!("write to {} exceeded {:?}, cancelling", self.path().display(), timeout);
                Err(PersistError::Timeout(timeout))
            }
        }
    }
}

/// Open, create and append on one connection, bailing out once `cancelled` is set.
fn write_quote(path: &Path, quote: &ExchangeQuote, cancelled: &AtomicBool) -> Result<(), PersistError> {
    if cancelled.load(Ordering::Acquire) {
        return Err(PersistError::Cancelled);
    }
    let mut db = Db::open(path)?;
    db.ping()?;
    db.init()?;
    if db.append_quote(quote, cancelled)? {
        Ok(())
    } else {
        Err(PersistError::Cancelled)
    }
}

/// Sets the flag when the persisting future finishes or is dropped.
/// Harmless once the write has completed.
struct CancelOnDrop(Arc<AtomicBool>);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_quote() -> ExchangeQuote {
        ExchangeQuote {
            code: "USD".to_string(),
            codein: "BRL".to_string(),
            name: "Dólar Americano/Real Brasileiro".to_string(),
            high: "5.4512".to_string(),
            low: "5.4105".to_string(),
            var_bid: "-0.0123".to_string(),
            pct_change: "-0.23".to_string(),
            bid: "5.43".to_string(),
            ask: "5.4312".to_string(),
            timestamp: "1718740795".to_string(),
            create_date: "2024-06-18 16:59:55".to_string(),
        }
    }

    #[tokio::test]
    async fn persist_creates_table_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let store = QuoteStore::new(dir.path().join("database.db"));

        store.persist(sample_quote(), Duration::from_secs(2)).await.unwrap();
        store.persist(sample_quote(), Duration::from_secs(2)).await.unwrap();

        let db = Db::open(store.path()).unwrap();
        assert_eq!(db.quote_count().unwrap(), 2);
        assert_eq!(db.list_quotes().unwrap()[0], sample_quote());
    }

    #[tokio::test]
    async fn persist_reports_open_failure() {
        let dir = tempfile::tempdir().unwrap();
        let store = QuoteStore::new(dir.path().join("missing").join("database.db"));

        let err = store.persist(sample_quote(), Duration::from_secs(2)).await.unwrap_err();
        assert!(matches!(err, PersistError::Db(_)));
    }

    #[tokio::test]
    async fn persist_times_out_while_table_is_locked() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("database.db");
        Db::create(&path).unwrap();

        let locker = rusqlite::Connection::open(&path).unwrap();
        locker.execute_batch("BEGIN EXCLUSIVE;").unwrap();

        let store = QuoteStore::new(&path);
        let started = std::time::Instant::now();
        let err = store
            .persist(sample_quote(), Duration::from_millis(50))
            .await
            .unwrap_err();

        assert!(matches!(err, PersistError::Timeout(_)));
        assert!(started.elapsed() < Duration::from_millis(900));
        locker.execute_batch("ROLLBACK;").unwrap();

        // The abandoned write gets the lock now but must not commit.
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(Db::open(&path).unwrap().quote_count().unwrap(), 0);
    }

    #[test]
    fn write_quote_honours_cancellation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("database.db");

        let err = write_quote(&path, &sample_quote(), &AtomicBool::new(true)).unwrap_err();
        assert!(matches!(err, PersistError::Cancelled));

        write_quote(&path, &sample_quote(), &AtomicBool::new(false)).unwrap();
        assert_eq!(Db::open(&path).unwrap().quote_count().unwrap(), 1);
    }
}
