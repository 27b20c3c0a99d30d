use crate::{
    Config,
    error::FetchError,
    model::{CurrentConditions, Forecast, LocationQuery, Suggestion},
    provider::weatherapi::WeatherApiProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod weatherapi;

/// The three upstream resources the pipeline reads.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions including air quality.
    async fn current(&self, location: &LocationQuery) -> Result<CurrentConditions, FetchError>;

    /// Seven-day forecast including air quality and alerts.
    async fn forecast(&self, location: &LocationQuery) -> Result<Forecast, FetchError>;

    /// Autocomplete candidates for a partial location name.
    async fn search(&self, query: &str) -> Result<Vec<Suggestion>, FetchError>;
}

/// Construct the WeatherAPI.com provider from config.
///
/// A missing API key is only an error when the base URL is the public
/// endpoint; a custom base URL may be a proxy that injects the key itself.
pub fn provider_from_config(config: &Config) -> anyhow::Result<WeatherApiProvider> {
    let api_key = config.api_key();

    if api_key.is_none() && config.base_url.is_none() {
        return Err(anyhow::anyhow!(
            "No API key configured for WeatherAPI.com.\n\
             Hint: run `nimbus configure` or set {}.",
            crate::config::API_KEY_ENV
        ));
    }

    let provider = WeatherApiProvider::with_options(
        api_key,
        config.base_url(),
        config.request_timeout(),
    )?;

    Ok(provider)
}
