//! `harper-serve`: loads config, sets up logging, and serves the HTTP API.

use std::time::Duration;

use clap::Parser;
use serve::{AppState, DEFAULT_ADDR, DEFAULT_MAX_ITERATIONS_CAP};

#[derive(Parser, Debug)]
#[command(name = "harper-serve")]
#[command(about = "HarperBot API: health, chat and ReAct agent over HTTP")]
struct Args {
    /// Address to listen on
    #[arg(long, env = "HARPER_ADDR", default_value = DEFAULT_ADDR)]
    addr: String,

    /// Upper bound for one /chat or /react request, in seconds
    #[arg(long, env = "HARPER_REQUEST_TIMEOUT_SECS", default_value_t = 120)]
    request_timeout_secs: u64,

    /// Largest max_iterations a /react request may ask for
    #[arg(long, env = "HARPER_MAX_ITERATIONS_CAP", default_value_t = DEFAULT_MAX_ITERATIONS_CAP)]
    max_iterations_cap: u32,

    /// Log entry and exit of every ReAct node
    #[arg(long, env = "HARPER_NODE_LOGGING")]
    node_logging: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Config first so RUST_LOG / LOG_FILE from .env or config.toml apply to logging.
    let applied = config::load_and_apply("harper", None);
    serve::logging::init()?;
    match &applied {
        Ok(report) if !report.is_empty() => {
            for (key, source) in &report.applied {
                tracing::info!(key = %key, source = %source, "loaded config value");
            }
        }
        Ok(_) => {}
        Err(e) => tracing::warn!(error = %e, "config not loaded; using process environment only"),
    }

    let args = Args::parse();
    let state = AppState::from_env()
        .with_request_timeout(Duration::from_secs(args.request_timeout_secs))
        .with_max_iterations_cap(args.max_iterations_cap)
        .with_node_logging(args.node_logging);
    serve::run_serve(&args.addr, state).await
}
