use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use reqwest::Client;
use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use std::time::Duration;
use tracing::{debug, instrument};

use crate::{
    error::FetchError,
    model::{
        AirQuality, Coordinates, CurrentConditions, DayForecast, Forecast, HourForecast,
        LocationQuery, Suggestion,
    },
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";
pub const FORECAST_DAYS: &str = "7";

#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: Option<String>,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn with_options(
        api_key: Option<&str>,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            api_key: api_key.map(str::to_owned),
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Issue `GET {base}/{endpoint}.json` and decode the body.
    ///
    /// The API key is sent as `key` only when one is configured.
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        params: &[(&str, &str)],
    ) -> Result<T, FetchError> {
        let url = format!("{}/{}.json", self.base_url, endpoint);

        let mut query: Vec<(&str, &str)> = Vec::with_capacity(params.len() + 1);
        if let Some(key) = self.api_key.as_deref() {
            query.push(("key", key));
        }
        query.extend_from_slice(params);

        let res = self.http.get(&url).query(&query).send().await?;

        let status = res.status();
        let body = res.bytes().await?;

        if !status.is_success() {
            debug!(
                endpoint,
                %status,
                body = %truncate_body(&String::from_utf8_lossy(&body)),
                "WeatherAPI request rejected"
            );
            return Err(FetchError::Status { endpoint, status });
        }

        serde_json::from_slice(&body).map_err(|source| FetchError::Decode { endpoint, source })
    }

    /// Approximate coordinates of the caller's public IP address.
    #[instrument(skip(self), level = "debug")]
    pub async fn lookup_ip(&self) -> Result<Coordinates, FetchError> {
        let parsed: WaIpLookup = self.get_json("ip", &[("q", "auto:ip")]).await?;

        Ok(Coordinates {
            latitude: parsed.lat,
            longitude: parsed.lon,
        })
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    #[instrument(skip(self, location), fields(location = %location), level = "debug")]
    async fn current(&self, location: &LocationQuery) -> Result<CurrentConditions, FetchError> {
        let parsed: WaCurrentResponse = self
            .get_json("current", &[("q", location.as_str()), ("aqi", "yes")])
            .await?;

        Ok(parsed.into())
    }

    #[instrument(skip(self, location), fields(location = %location), level = "debug")]
    async fn forecast(&self, location: &LocationQuery) -> Result<Forecast, FetchError> {
        let parsed: WaForecastResponse = self
            .get_json(
                "forecast",
                &[
                    ("q", location.as_str()),
                    ("days", FORECAST_DAYS),
                    ("aqi", "yes"),
                    ("alerts", "yes"),
                ],
            )
            .await?;

        Ok(parsed.into())
    }

    #[instrument(skip(self), level = "debug")]
    async fn search(&self, query: &str) -> Result<Vec<Suggestion>, FetchError> {
        let parsed: Vec<WaSearchResult> = self.get_json("search", &[("q", query)]).await?;

        Ok(parsed
            .into_iter()
            .map(|r| Suggestion {
                name: r.name,
                region: r.region,
                country: r.country,
            })
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
    region: String,
    country: String,
    #[serde(deserialize_with = "local_datetime")]
    localtime: NaiveDateTime,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
    code: i64,
}

#[derive(Debug, Deserialize)]
struct WaAirQuality {
    #[serde(rename = "us-epa-index")]
    us_epa_index: Option<i64>,
    pm2_5: f64,
    pm10: f64,
    o3: f64,
    no2: f64,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    feelslike_c: f64,
    condition: WaCondition,
    #[serde(deserialize_with = "flag")]
    is_day: bool,
    vis_km: f64,
    humidity: u8,
    wind_kph: f64,
    pressure_mb: f64,
    uv: f64,
    precip_mm: f64,
    air_quality: Option<WaAirQuality>,
}

#[derive(Debug, Deserialize)]
struct WaCurrentResponse {
    location: WaLocation,
    current: WaCurrent,
}

#[derive(Debug, Deserialize)]
struct WaForecastHour {
    #[serde(deserialize_with = "local_datetime")]
    time: NaiveDateTime,
    temp_c: f64,
    condition: WaCondition,
    #[serde(deserialize_with = "flag")]
    is_day: bool,
}

#[derive(Debug, Deserialize)]
struct WaDay {
    maxtemp_c: f64,
    mintemp_c: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaForecastDay {
    date: NaiveDate,
    day: WaDay,
    hour: Vec<WaForecastHour>,
}

#[derive(Debug, Deserialize)]
struct WaForecast {
    forecastday: Vec<WaForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WaForecastResponse {
    forecast: WaForecast,
}

#[derive(Debug, Deserialize)]
struct WaSearchResult {
    name: String,
    region: String,
    country: String,
}

#[derive(Debug, Deserialize)]
struct WaIpLookup {
    lat: f64,
    lon: f64,
}

impl From<WaCurrentResponse> for CurrentConditions {
    fn from(parsed: WaCurrentResponse) -> Self {
        let WaCurrentResponse { location, current } = parsed;

        CurrentConditions {
            location_name: location.name,
            region: location.region,
            country: location.country,
            local_time: location.localtime,
            temp_c: current.temp_c,
            feels_like_c: current.feelslike_c,
            condition_code: current.condition.code,
            condition_text: current.condition.text,
            is_day: current.is_day,
            visibility_km: current.vis_km,
            humidity_pct: current.humidity,
            wind_kph: current.wind_kph,
            pressure_mb: current.pressure_mb,
            uv_index: current.uv,
            precip_mm: current.precip_mm,
            air_quality: current.air_quality.map(|aq| AirQuality {
                us_epa_index: aq.us_epa_index,
                pm2_5: aq.pm2_5,
                pm10: aq.pm10,
                o3: aq.o3,
                no2: aq.no2,
            }),
        }
    }
}

impl From<WaForecastResponse> for Forecast {
    fn from(parsed: WaForecastResponse) -> Self {
        let mut days = parsed.forecast.forecastday;

        let hourly = days
            .first_mut()
            .map(|day| std::mem::take(&mut day.hour))
            .unwrap_or_default()
            .into_iter()
            .map(|h| HourForecast {
                time: h.time,
                temp_c: h.temp_c,
                condition_code: h.condition.code,
                condition_text: h.condition.text,
                is_day: h.is_day,
            })
            .collect();

        let daily = days
            .into_iter()
            .map(|d| DayForecast {
                date: d.date,
                condition_code: d.day.condition.code,
                condition_text: d.day.condition.text,
                max_temp_c: d.day.maxtemp_c,
                min_temp_c: d.day.mintemp_c,
            })
            .collect();

        Forecast { hourly, daily }
    }
}

/// Provider timestamps are local wall-clock strings like `2024-10-02 9:05`.
fn local_datetime<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M").map_err(serde::de::Error::custom)
}

/// `is_day` arrives as 0 or 1.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(i64::deserialize(deserializer)? != 0)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
