//! SQLite storage for fetched quotes.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use rusqlite::{params, Connection, TransactionBehavior};

use crate::ExchangeQuote;

#[derive(thiserror::Error, Debug)]
pub enum DbError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// How long a statement waits on another writer's lock before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(1);

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS contacaos (
    code TEXT,
    codein TEXT,
    name TEXT,
    high TEXT,
    low TEXT,
    varBid TEXT,
    pctChange TEXT,
    bid TEXT,
    ask TEXT,
    timestamp TEXT,
    create_date TEXT
)";

pub struct Db {
    conn: Connection,
}

impl Db {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Creates the parent directory of `path` if needed, then opens and initialises it.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, DbError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let db = Self::open(path)?;
        db.ping()?;
        db.init()?;
        Ok(db)
    }

    /// Round-trips a trivial query to prove the connection is usable.
    pub fn ping(&self) -> Result<(), DbError> {
        self.conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        Ok(())
    }

    pub fn init(&self) -> Result<(), DbError> {
        self.conn.execute(SCHEMA, [])?;
        Ok(())
    }

    /// Appends one row inside an immediate transaction that commits only if
    /// `cancelled` is still clear once the write lock is held and the row is
    /// written. Returns whether the row was committed. Repeated quotes are
    /// stored again; there is no key.
    pub fn append_quote(&mut self, quote: &ExchangeQuote, cancelled: &AtomicBool) -> Result<bool, DbError> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        if cancelled.load(Ordering::Acquire) {
            return Ok(false);
        }
        insert_row(&tx, quote)?;
        if cancelled.load(Ordering::Acquire) {
            return Ok(false);
        }
        tx.commit()?;
        Ok(true)
    }

    pub fn quote_count(&self) -> Result<i64, DbError> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM contacaos", [], |row| row.get(0))?;
        Ok(count)
    }

    /// All stored quotes in insertion order.
    pub fn list_quotes(&self) -> Result<Vec<ExchangeQuote>, DbError> {
        let mut stmt = self.conn.prepare(
            "SELECT code, codein, name, high, low, varBid, pctChange, bid, ask, timestamp, create_date
             FROM contacaos ORDER BY rowid",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(ExchangeQuote {
                code: row.get(0)?,
                codein: row.get(1)?,
                name: row.get(2)?,
                high: row.get(3)?,
                low: row.get(4)?,
                var_bid: row.get(5)?,
                pct_change: row.get(6)?,
                bid: row.get(7)?,
                ask: row.get(8)?,
                timestamp: row.get(9)?,
                create_date: row.get(10)?,
            })
        })?;
        let mut quotes = Vec::new();
        for row in rows {
            quotes.push(row?);
        }
        Ok(quotes)
    }
}

fn insert_row(conn: &Connection, quote: &ExchangeQuote) -> Result<(), DbError> {
    conn.execute(
        "INSERT INTO contacaos (code, codein, name, high, low, varBid, pctChange, bid, ask, timestamp, create_date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            quote.code,
            quote.codein,
            quote.name,
            quote.high,
            quote.low,
            quote.var_bid,
            quote.pct_change,
            quote.bid,
            quote.ask,
            quote.timestamp,
            quote.create_date,
        ],
    )?;
    Ok(())
}
