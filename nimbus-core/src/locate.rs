//! Best-effort location lookup.

use async_trait::async_trait;
use std::{fmt::Debug, time::Duration};
use tracing::{info, warn};

use crate::{
    error::GeolocationError,
    model::{Coordinates, LocationQuery},
    provider::weatherapi::WeatherApiProvider,
};

/// Used whenever no coordinates can be obtained.
pub const DEFAULT_LOCATION: &str = "New York";

#[async_trait]
pub trait Locator: Send + Sync + Debug {
    async fn locate(&self) -> Result<Coordinates, GeolocationError>;
}

/// Coordinates of the caller's public IP, via the provider's lookup endpoint.
#[derive(Debug, Clone)]
pub struct IpLocator {
    provider: WeatherApiProvider,
}

impl IpLocator {
    pub fn new(provider: WeatherApiProvider) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Locator for IpLocator {
    async fn locate(&self) -> Result<Coordinates, GeolocationError> {
        self.provider
            .lookup_ip()
            .await
            .map_err(|err| GeolocationError::Lookup(err.to_string()))
    }
}

/// Coordinates taken from configuration.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocator(pub Coordinates);

#[async_trait]
impl Locator for FixedLocator {
    async fn locate(&self) -> Result<Coordinates, GeolocationError> {
        Ok(self.0)
    }
}

/// For hosts with no way to locate the user.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unsupported;

#[async_trait]
impl Locator for Unsupported {
    async fn locate(&self) -> Result<Coordinates, GeolocationError> {
        Err(GeolocationError::Unsupported)
    }
}

/// One attempt bounded by `timeout`.
pub async fn try_locate<L>(locator: &L, timeout: Duration) -> Result<Coordinates, GeolocationError>
where
    L: Locator + ?Sized,
{
    match tokio::time::timeout(timeout, locator.locate()).await {
        Ok(result) => result,
        Err(_) => Err(GeolocationError::Timeout),
    }
}

/// Coordinates as `"lat,lon"`, or `fallback` on any failure. No retry.
pub async fn resolve_location<L>(locator: &L, timeout: Duration, fallback: &str) -> LocationQuery
where
    L: Locator + ?Sized,
{
    match try_locate(locator, timeout).await {
        Ok(coords) => {
            info!(latitude = coords.latitude, longitude = coords.longitude, "located");
            coords.into()
        }
        Err(err) => {
            warn!(error = %err, fallback, "geolocation failed, using fallback location");
            LocationQuery::new(fallback)
        }
    }
}
