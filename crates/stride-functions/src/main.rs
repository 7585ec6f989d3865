use std::net::SocketAddr;

use anyhow::Context;
use clap::Parser;
use stride_config::StrideConfig;
use stride_functions::{AppState, GeminiClient, router};

/// Serve the Stride generation functions.
#[derive(Debug, Parser)]
#[command(name = "stride-functions", version)]
struct Cli {
    /// Address to listen on (defaults to `server.bind_addr`)
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Quiet mode (errors only)
    #[arg(short, long)]
    quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("stride-functions error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let config = StrideConfig::load_with_dotenv().context("failed to load configuration")?;
    let model = GeminiClient::new(config.require_gemini()?)?;
    let addr = match cli.bind {
        Some(addr) => addr,
        None => config.server.socket_addr()?,
    };

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(addr = %listener.local_addr()?, model = %config.gemini.model, "listening");

    axum::serve(listener, router(AppState::new(model)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "could not listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("STRIDE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_flag_parses_socket_address() {
        let cli = Cli::try_parse_from(["stride-functions", "--bind", "0.0.0.0:8080", "-v"]).unwrap();
        assert_eq!(cli.bind, Some("0.0.0.0:8080".parse().unwrap()));
        assert!(cli.verbose);
        assert!(!cli.quiet);
    }

    #[test]
    fn bad_bind_address_is_rejected() {
        assert!(Cli::try_parse_from(["stride-functions", "--bind", "nowhere"]).is_err());
    }
}
