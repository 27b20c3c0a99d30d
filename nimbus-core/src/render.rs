//! Projects a [`WeatherSnapshot`] onto a display surface.
//!
//! The surface is anything implementing [`DisplayPort`]: the CLI's terminal
//! printer, a web front end, or a recording double in tests.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    icon::{IconId, resolve_icon},
    model::{AirQuality, DayForecast, HourForecast, Suggestion, WeatherSnapshot},
};

/// Entries requested for the hourly strip.
pub const HOURLY_WINDOW: usize = 24;

/// Particles spawned by the rain effect.
pub const RAIN_DROPS: usize = 50;

/// Named single-value display regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    LocationName,
    LocationDetails,
    LocalTime,
    CurrentTemp,
    Condition,
    FeelsLike,
    WeatherIcon,
    Visibility,
    Humidity,
    WindSpeed,
    Pressure,
    UvIndex,
    Precipitation,
    AqiValue,
    AqiLabel,
    Pm25,
    Pm10,
    O3,
    No2,
    SearchInput,
}

/// Which top-level section is visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    Content,
    Error(String),
}

/// Background classification of the current condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherTheme {
    Rainy,
    Snowy,
    Stormy,
    Sunny,
    Cloudy,
}

impl WeatherTheme {
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Rainy => "weather-rainy",
            Self::Snowy => "weather-snowy",
            Self::Stormy => "weather-stormy",
            Self::Sunny => "weather-sunny",
            Self::Cloudy => "weather-cloudy",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourSlot {
    pub label: String,
    pub icon: IconId,
    pub temp: String,
    pub condition: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DaySlot {
    pub label: String,
    pub icon: IconId,
    pub condition: String,
    pub high: String,
    pub low: String,
}

/// One decorative rain particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RainDrop {
    /// Horizontal position, percent of width in `[0, 100)`.
    pub left_pct: f64,
    /// Seconds in `[0, 2)`.
    pub delay_secs: f64,
    /// Seconds in `[0.5, 1.5)`.
    pub duration_secs: f64,
}

/// Operations the pipeline performs on its output surface.
pub trait DisplayPort: Send {
    fn set_text(&mut self, region: Region, text: &str);
    fn set_icon(&mut self, region: Region, icon: IconId);
    fn set_class(&mut self, region: Region, class: &str);

    fn set_hourly(&mut self, slots: &[HourSlot]);
    fn set_daily(&mut self, slots: &[DaySlot]);

    /// Remove whichever weather theme is applied.
    fn clear_weather_theme(&mut self);
    fn set_weather_theme(&mut self, theme: WeatherTheme);
    /// Replace the rain layer; an empty slice clears it.
    fn set_rain(&mut self, drops: &[RainDrop]);

    fn set_view(&mut self, view: &ViewState);

    /// `None` hides the suggestion list.
    fn set_suggestions(&mut self, suggestions: Option<&[Suggestion]>);
}

#[derive(Debug)]
pub struct Renderer {
    rng: StdRng,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic rain layout, for tests and reproducible screenshots.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn render<D: DisplayPort + ?Sized>(&mut self, snapshot: &WeatherSnapshot, display: &mut D) {
        let current = &snapshot.current;

        display.set_text(Region::LocationName, &current.location_name);
        display.set_text(
            Region::LocationDetails,
            &format!("{}, {}", current.region, current.country),
        );
        display.set_text(Region::LocalTime, &format_local_time(current.local_time));

        display.set_text(Region::CurrentTemp, &format_temp(current.temp_c));
        display.set_text(Region::Condition, &current.condition_text);
        display.set_text(
            Region::FeelsLike,
            &format!("Feels like {}", format_temp(current.feels_like_c)),
        );
        display.set_icon(
            Region::WeatherIcon,
            resolve_icon(current.condition_code, current.is_day),
        );

        display.set_text(Region::Visibility, &format!("{} km", current.visibility_km));
        display.set_text(Region::Humidity, &format!("{}%", current.humidity_pct));
        display.set_text(Region::WindSpeed, &format!("{} km/h", current.wind_kph));
        display.set_text(Region::Pressure, &format!("{} mb", current.pressure_mb));
        display.set_text(Region::UvIndex, &current.uv_index.to_string());
        display.set_text(Region::Precipitation, &format!("{} mm", current.precip_mm));

        // Left as-is when the payload has no air quality block.
        if let Some(aq) = &current.air_quality {
            render_air_quality(aq, display);
        }

        let current_hour = current.local_time.hour() as usize;
        display.set_hourly(&hourly_slots(&snapshot.hourly, current_hour));
        display.set_daily(&daily_slots(&snapshot.daily));

        let theme = classify_theme(current.condition_code, current.is_day);
        display.clear_weather_theme();
        display.set_weather_theme(theme);
        if theme == WeatherTheme::Rainy {
            let drops = self.rain_drops();
            display.set_rain(&drops);
        } else {
            display.set_rain(&[]);
        }
    }

    fn rain_drops(&mut self) -> Vec<RainDrop> {
        (0..RAIN_DROPS)
            .map(|_| RainDrop {
                left_pct: self.rng.random_range(0.0..100.0),
                delay_secs: self.rng.random_range(0.0..2.0),
                duration_secs: self.rng.random_range(0.5..1.5),
            })
            .collect()
    }
}

fn render_air_quality<D: DisplayPort + ?Sized>(aq: &AirQuality, display: &mut D) {
    let level = aq.level();
    let value = aq
        .us_epa_index
        .map(|i| i.to_string())
        .unwrap_or_else(|| "N/A".to_string());

    display.set_text(Region::AqiValue, &value);
    display.set_class(Region::AqiValue, level.css_class());
    display.set_text(Region::AqiLabel, level.label());

    display.set_text(Region::Pm25, &format_concentration(aq.pm2_5));
    display.set_text(Region::Pm10, &format_concentration(aq.pm10));
    display.set_text(Region::O3, &format_concentration(aq.o3));
    display.set_text(Region::No2, &format_concentration(aq.no2));
}

/// Priority order: rain, snow, thunder, clear by day, everything else.
pub fn classify_theme(code: i64, is_day: bool) -> WeatherTheme {
    match code {
        1180 | 1183 | 1186 | 1189 | 1192 | 1195 | 1240 | 1243 | 1246 => WeatherTheme::Rainy,
        1210 | 1213 | 1216 | 1219 | 1222 | 1225 | 1255 | 1258 => WeatherTheme::Snowy,
        1087 | 1273 | 1276 | 1279 | 1282 => WeatherTheme::Stormy,
        1000 if is_day => WeatherTheme::Sunny,
        _ => WeatherTheme::Cloudy,
    }
}

/// Up to [`HOURLY_WINDOW`] hours starting at `current_hour`.
///
/// Does not continue into the next day: late in the day fewer slots come back.
pub fn hourly_slots(hours: &[HourForecast], current_hour: usize) -> Vec<HourSlot> {
    hours
        .iter()
        .skip(current_hour)
        .take(HOURLY_WINDOW)
        .map(|h| HourSlot {
            label: hour_label(h.time.hour()),
            icon: resolve_icon(h.condition_code, h.is_day),
            temp: format_temp(h.temp_c),
            condition: h.condition_text.clone(),
        })
        .collect()
}

pub fn daily_slots(days: &[DayForecast]) -> Vec<DaySlot> {
    days.iter()
        .enumerate()
        .map(|(index, d)| DaySlot {
            label: day_label(index, d.date.weekday()),
            icon: resolve_icon(d.condition_code, true),
            condition: d.condition_text.clone(),
            high: format_temp(d.max_temp_c),
            low: format_temp(d.min_temp_c),
        })
        .collect()
}

fn day_label(index: usize, weekday: Weekday) -> String {
    match index {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => weekday_name(weekday).to_string(),
    }
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// 12-hour clock label: `12 AM`, `1 AM`, ..., `12 PM`, `1 PM`, ...
pub fn hour_label(hour: u32) -> String {
    match hour {
        0 => "12 AM".to_string(),
        12 => "12 PM".to_string(),
        h if h > 12 => format!("{} PM", h - 12),
        h => format!("{h} AM"),
    }
}

/// Nearest whole degree.
pub fn format_temp(celsius: f64) -> String {
    format!("{}°", celsius.round() as i64)
}

pub fn format_local_time(time: NaiveDateTime) -> String {
    time.format("%A %-I:%M %p").to_string()
}

fn format_concentration(value: f64) -> String {
    format!("{value:.1} μg/m³")
}
