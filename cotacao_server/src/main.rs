use anyhow::{Context, Result};
use cotacao_server::{app_router, AppState, Config, Db, LogFormat};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing(LogFormat::from_env());
    let config = Config::from_env();

    // Fail at boot on an unusable database rather than on the first request.
    let stored = Db::create(&config.db_path)
        .and_then(|db| db.quote_count())
        .with_context(|| format!("failed to prepare database {}", config.db_path.display()))?;
    tracing::info!(
        "Database {} ready with {} stored quotes",
        config.db_path.display(),
        stored
    );

    let router = app_router(AppState::from_config(&config));
    tracing::info!(
        "Listening on {} (pair {}, upstream {})",
        config.listen_addr,
        config.pair,
        config.upstream_url
    );
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    axum::serve(listener, router).await?;
    Ok(())
}
