use tracing::instrument;

use crate::{
    error::FetchError,
    model::{LocationQuery, WeatherSnapshot},
    provider::WeatherProvider,
};

/// Current conditions and forecast for one location, merged.
///
/// Both requests are in flight at once and both must succeed; the first
/// failure fails the whole fetch and no partial snapshot is built.
#[instrument(skip(provider, location), fields(location = %location), level = "debug")]
pub async fn fetch_weather<P>(
    provider: &P,
    location: &LocationQuery,
) -> Result<WeatherSnapshot, FetchError>
where
    P: WeatherProvider + ?Sized,
{
    let (current, forecast) =
        tokio::try_join!(provider.current(location), provider.forecast(location))?;

    Ok(WeatherSnapshot::merge(current, forecast))
}
