//! Doubles and fixtures shared by the unit tests.

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::Mutex;
use reqwest::StatusCode;
use std::{
    collections::HashMap,
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
    time::Duration,
};

use crate::{
    error::FetchError,
    icon::IconId,
    model::{
        AirQuality, CurrentConditions, DayForecast, Forecast, HourForecast, LocationQuery,
        Suggestion, WeatherSnapshot,
    },
    provider::WeatherProvider,
    render::{DaySlot, DisplayPort, HourSlot, RainDrop, Region, ViewState, WeatherTheme},
};

/// London on Wednesday 2024-10-02 at 09:05, 24 hours and 7 days of forecast.
pub fn snapshot() -> WeatherSnapshot {
    let day = NaiveDate::from_ymd_opt(2024, 10, 2).unwrap();

    let current = CurrentConditions {
        location_name: "London".into(),
        region: "City of London, Greater London".into(),
        country: "United Kingdom".into(),
        local_time: day.and_hms_opt(9, 5, 0).unwrap(),
        temp_c: 12.6,
        feels_like_c: 10.4,
        condition_code: 1006,
        condition_text: "Cloudy".into(),
        is_day: true,
        visibility_km: 10.0,
        humidity_pct: 82,
        wind_kph: 15.1,
        pressure_mb: 1012.0,
        uv_index: 3.0,
        precip_mm: 0.4,
        air_quality: Some(AirQuality {
            us_epa_index: Some(2),
            pm2_5: 5.54,
            pm10: 7.25,
            o3: 48.2,
            no2: 13.5,
        }),
    };

    let hourly = (0..24)
        .map(|h| HourForecast {
            time: day.and_hms_opt(h, 0, 0).unwrap(),
            temp_c: 8.0 + f64::from(h) / 3.0,
            condition_code: 1003,
            condition_text: "Partly cloudy".into(),
            is_day: (7..19).contains(&h),
        })
        .collect();

    let daily = (0..7)
        .map(|d| DayForecast {
            date: day + chrono::Days::new(d),
            condition_code: 1063,
            condition_text: "Patchy rain possible".into(),
            max_temp_c: 15.5,
            min_temp_c: 7.2,
        })
        .collect();

    WeatherSnapshot {
        current,
        hourly,
        daily,
    }
}

/// Records every call so tests can assert on the final display state.
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub texts: HashMap<Region, String>,
    pub icons: HashMap<Region, IconId>,
    pub classes: HashMap<Region, String>,
    pub hourly: Vec<HourSlot>,
    pub daily: Vec<DaySlot>,
    pub weather_theme: Option<WeatherTheme>,
    pub theme_clears: usize,
    pub rain: Vec<RainDrop>,
    pub views: Vec<ViewState>,
    pub suggestions: Option<Vec<Suggestion>>,
    pub suggestion_updates: usize,
}

impl RecordingDisplay {
    pub fn text(&self, region: Region) -> &str {
        self.texts.get(&region).map(String::as_str).unwrap_or_default()
    }

    pub fn view(&self) -> Option<&ViewState> {
        self.views.last()
    }
}

impl DisplayPort for RecordingDisplay {
    fn set_text(&mut self, region: Region, text: &str) {
        self.texts.insert(region, text.to_string());
    }

    fn set_icon(&mut self, region: Region, icon: IconId) {
        self.icons.insert(region, icon);
    }

    fn set_class(&mut self, region: Region, class: &str) {
        self.classes.insert(region, class.to_string());
    }

    fn set_hourly(&mut self, slots: &[HourSlot]) {
        self.hourly = slots.to_vec();
    }

    fn set_daily(&mut self, slots: &[DaySlot]) {
        self.daily = slots.to_vec();
    }

    fn clear_weather_theme(&mut self) {
        self.weather_theme = None;
        self.theme_clears += 1;
    }

    fn set_weather_theme(&mut self, theme: WeatherTheme) {
        assert!(self.weather_theme.is_none(), "previous theme was not cleared");
        self.weather_theme = Some(theme);
    }

    fn set_rain(&mut self, drops: &[RainDrop]) {
        self.rain = drops.to_vec();
    }

    fn set_view(&mut self, view: &ViewState) {
        self.views.push(view.clone());
    }

    fn set_suggestions(&mut self, suggestions: Option<&[Suggestion]>) {
        self.suggestions = suggestions.map(<[Suggestion]>::to_vec);
        self.suggestion_updates += 1;
    }
}

/// Scriptable provider: per-query latency, forced failures, call counters.
#[derive(Debug, Default)]
pub struct FakeProvider {
    pub delays: Mutex<HashMap<String, Duration>>,
    pub fail_current: AtomicBool,
    pub fail_forecast: AtomicBool,
    pub fail_search: AtomicBool,
    pub suggestions: Mutex<HashMap<String, Vec<Suggestion>>>,
    pub search_calls: Mutex<Vec<String>>,
    pub current_calls: AtomicUsize,
    pub forecast_calls: AtomicUsize,
}

impl FakeProvider {
    pub fn with_delay(self, query: &str, delay: Duration) -> Self {
        self.delays.lock().insert(query.to_string(), delay);
        self
    }

    pub fn with_suggestions(self, query: &str, names: &[&str]) -> Self {
        let list = names
            .iter()
            .map(|n| Suggestion {
                name: (*n).to_string(),
                region: "Region".into(),
                country: "Country".into(),
            })
            .collect();
        self.suggestions.lock().insert(query.to_string(), list);
        self
    }

    async fn pause(&self, query: &str) {
        let delay = self.delays.lock().get(query).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

fn server_error(endpoint: &'static str) -> FetchError {
    FetchError::Status {
        endpoint,
        status: StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[async_trait]
impl WeatherProvider for FakeProvider {
    async fn current(&self, location: &LocationQuery) -> Result<CurrentConditions, FetchError> {
        self.current_calls.fetch_add(1, Ordering::SeqCst);
        self.pause(location.as_str()).await;

        if self.fail_current.load(Ordering::SeqCst) {
            return Err(server_error("current"));
        }

        let mut current = snapshot().current;
        current.location_name = location.to_string();
        Ok(current)
    }

    async fn forecast(&self, location: &LocationQuery) -> Result<Forecast, FetchError> {
        self.forecast_calls.fetch_add(1, Ordering::SeqCst);
        self.pause(location.as_str()).await;

        if self.fail_forecast.load(Ordering::SeqCst) {
            return Err(server_error("forecast"));
        }

        let snap = snapshot();
        Ok(Forecast {
            hourly: snap.hourly,
            daily: snap.daily,
        })
    }

    async fn search(&self, query: &str) -> Result<Vec<Suggestion>, FetchError> {
        self.search_calls.lock().push(query.to_string());
        self.pause(query).await;

        if self.fail_search.load(Ordering::SeqCst) {
            return Err(server_error("search"));
        }

        Ok(self.suggestions.lock().get(query).cloned().unwrap_or_default())
    }
}
