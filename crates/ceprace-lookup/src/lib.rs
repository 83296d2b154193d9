#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! CEP resolution by racing several address providers
//!
//! The first provider to answer with a usable address wins; the others
//! are cancelled.

mod cep;
mod error;
mod http_client;
mod provider;
mod race;
mod types;

pub use cep::Cep;
pub use error::{LookupError, Result};
pub use provider::{CepProvider, JsonProvider, WireShape, brasil_api::BrasilApiShape, via_cep::ViaCepShape};
pub use race::{Race, RaceBuilder};
pub use types::{Address, RaceOutcome};

/// Build the race selector from configuration
pub fn build_race(config: &ceprace_config::Config) -> Result<Race> {
    RaceBuilder::new(config).build()
}

/// Normalize `raw`, then race the configured providers for it
///
/// Invalid input is rejected before any provider is built, so nothing
/// touches the network for it.
pub async fn resolve(
    raw: &str,
    config: &ceprace_config::Config,
    shutdown: &tokio_util::sync::CancellationToken,
) -> Result<RaceOutcome> {
    let cep = Cep::parse(raw)?;
    let race = build_race(config)?;

    tracing::debug!(
        %cep,
        providers = ?race.provider_names().collect::<Vec<_>>(),
        "resolving CEP"
    );

    race.run_until(&cep, shutdown).await
}
