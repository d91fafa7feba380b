//! Server configuration read from `COTACAO_*` environment variables.
//!
//! Every setting has a default, so a bare `cotacao-server` listens on
//! `0.0.0.0:8080`, queries the production API for USD-BRL and writes to
//! `./db/database.db`.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use economia_api::{CurrencyPair, DEFAULT_BASE_URL};

pub const DEFAULT_LISTEN_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 8080);
pub const DEFAULT_DB_PATH: &str = "./db/database.db";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_millis(300);
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_millis(200);
pub const DEFAULT_DB_TIMEOUT: Duration = Duration::from_millis(10);

/// Log output format for the tracing subscriber.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    pub fn from_env() -> Self {
        match std::env::var("COTACAO_LOG_FORMAT") {
            Ok(val) if val.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Text,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub listen_addr: SocketAddr,
    /// Base URL of the quotes API, without the `/json/last` path.
    pub upstream_url: String,
    pub pair: CurrencyPair,
    pub db_path: PathBuf,
    /// Overall deadline for one `GET /cotacao`.
    pub request_timeout: Duration,
    /// Upper bound for the upstream call, clamped to the request deadline.
    pub upstream_timeout: Duration,
    /// Upper bound for the insert, clamped to the request deadline.
    pub db_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR,
            upstream_url: DEFAULT_BASE_URL.to_string(),
            pair: CurrencyPair::usd_brl(),
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            upstream_timeout: DEFAULT_UPSTREAM_TIMEOUT,
            db_timeout: DEFAULT_DB_TIMEOUT,
        }
    }
}

impl Config {
    /// Builds the configuration from the environment. Unparseable values
    /// are logged and replaced by their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            listen_addr: env_parse("COTACAO_LISTEN_ADDR", defaults.listen_addr),
            upstream_url: std::env::var("COTACAO_UPSTREAM_URL")
                .ok()
                .filter(|val| !val.trim().is_empty())
                .unwrap_or(defaults.upstream_url),
            pair: env_parse("COTACAO_PAIR", defaults.pair),
            db_path: std::env::var("COTACAO_DB_PATH")
                .ok()
                .filter(|val| !val.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            request_timeout: env_millis("COTACAO_REQUEST_TIMEOUT_MS", defaults.request_timeout),
            upstream_timeout: env_millis("COTACAO_UPSTREAM_TIMEOUT_MS", defaults.upstream_timeout),
            db_timeout: env_millis("COTACAO_DB_TIMEOUT_MS", defaults.db_timeout),
        }
    }
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val.trim().parse::<T>().unwrap_or_else(|e| {
            tracing::warn!("Ignoring invalid {}={:?}: {}", key, val, e);
            default
        }),
        Err(_) => default,
    }
}

fn env_millis(key: &str, default: Duration) -> Duration {
    let default_ms = u64::try_from(default.as_millis()).unwrap_or(u64::MAX);
    Duration::from_millis(env_parse(key, default_ms))
}
