#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;

use anyhow::Context;
use args::Args;
use ceprace_config::Config;
use clap::Parser;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    ceprace_telemetry::init(&args.log_filter)?;

    let config = Config::load_or_default(args.config.as_deref())?;

    // Abort in-flight requests on Ctrl+C
    let shutdown = CancellationToken::new();
    let shutdown_clone = shutdown.clone();

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received");
            shutdown_clone.cancel();
        }
    });

    let outcome = ceprace_lookup::resolve(&args.cep, &config, &shutdown)
        .await
        .with_context(|| format!("failed to resolve CEP {:?}", args.cep))?;

    println!("{}", outcome.report());

    Ok(())
}
