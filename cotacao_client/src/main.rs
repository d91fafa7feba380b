//! `cotacao`: asks the local quote server for the current dollar bid,
//! writes `Dolar: <bid>` to a file and echoes the server's raw answer.

mod fetch;
mod output;

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

#[derive(Parser)]
#[command(name = "cotacao")]
#[command(about = "Fetch the USD-BRL bid from the local quote server")]
struct Cli {
    /// Quote endpoint of the server
    #[arg(long, default_value = "http://localhost:8080/cotacao")]
    url: String,

    /// File that receives the `Dolar: <bid>` line
    #[arg(long, default_value = "cotacao.txt")]
    output: PathBuf,

    /// Deadline for the whole request, in milliseconds
    #[arg(long, default_value_t = 300)]
    timeout_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("cotacao=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(&cli, &mut std::io::stdout()).await
}

/// Nothing is written to `cli.output` or `out` unless the fetch succeeded.
async fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<()> {
    let timeout = Duration::from_millis(cli.timeout_ms);
    let reply = fetch::fetch_bid(&cli.url, timeout)
        .await
        .with_context(|| format!("failed to get quote from {}", cli.url))?;

    let size = output::write_summary(&cli.output, &reply.bid)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    eprintln!("Wrote {} bytes to {}", size, cli.output.display());

    output::echo_body(out, &reply.body).context("failed to write response to stdout")?;
    Ok(())
}
