use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Free text or a `"lat,lon"` pair, passed to the provider verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationQuery(String);

impl LocationQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self(query.into())
    }

    pub fn from_coordinates(latitude: f64, longitude: f64) -> Self {
        Self(format!("{latitude},{longitude}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LocationQuery {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for LocationQuery {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Coordinates> for LocationQuery {
    fn from(value: Coordinates) -> Self {
        Self::from_coordinates(value.latitude, value.longitude)
    }
}

/// One autocomplete candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub name: String,
    pub region: String,
    pub country: String,
}

impl Suggestion {
    /// The string searched when this suggestion is picked.
    pub fn label(&self) -> String {
        format!("{}, {}, {}", self.name, self.region, self.country)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQuality {
    pub us_epa_index: Option<i64>,
    pub pm2_5: f64,
    pub pm10: f64,
    pub o3: f64,
    pub no2: f64,
}

impl AirQuality {
    pub fn level(&self) -> AqiLevel {
        AqiLevel::from_index(self.us_epa_index)
    }
}

/// US EPA air quality band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AqiLevel {
    Good,
    Moderate,
    UnhealthyForSensitive,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
    Unknown,
}

impl AqiLevel {
    pub fn from_index(index: Option<i64>) -> Self {
        match index {
            Some(1) => Self::Good,
            Some(2) => Self::Moderate,
            Some(3) => Self::UnhealthyForSensitive,
            Some(4) => Self::Unhealthy,
            Some(5) => Self::VeryUnhealthy,
            Some(6) => Self::Hazardous,
            _ => Self::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::UnhealthyForSensitive => "Unhealthy for Sensitive",
            Self::Unhealthy => "Unhealthy",
            Self::VeryUnhealthy => "Very Unhealthy",
            Self::Hazardous => "Hazardous",
            Self::Unknown => "Unknown",
        }
    }

    /// Severity class for the index badge; empty when the band is unknown.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Good => "aqi-good",
            Self::Moderate => "aqi-moderate",
            Self::UnhealthyForSensitive => "aqi-unhealthy-sensitive",
            Self::Unhealthy => "aqi-unhealthy",
            Self::VeryUnhealthy => "aqi-very-unhealthy",
            Self::Hazardous => "aqi-hazardous",
            Self::Unknown => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub location_name: String,
    pub region: String,
    pub country: String,
    pub local_time: NaiveDateTime,
    pub temp_c: f64,
    pub feels_like_c: f64,
    pub condition_code: i64,
    pub condition_text: String,
    pub is_day: bool,
    pub visibility_km: f64,
    pub humidity_pct: u8,
    pub wind_kph: f64,
    pub pressure_mb: f64,
    pub uv_index: f64,
    pub precip_mm: f64,
    pub air_quality: Option<AirQuality>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourForecast {
    pub time: NaiveDateTime,
    pub temp_c: f64,
    pub condition_code: i64,
    pub condition_text: String,
    pub is_day: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayForecast {
    pub date: NaiveDate,
    pub condition_code: i64,
    pub condition_text: String,
    pub max_temp_c: f64,
    pub min_temp_c: f64,
}

/// Forecast half of a snapshot, as returned by the forecast endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Hours of the first forecast day.
    pub hourly: Vec<HourForecast>,
    pub daily: Vec<DayForecast>,
}

/// Everything rendered for one location at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub current: CurrentConditions,
    pub hourly: Vec<HourForecast>,
    pub daily: Vec<DayForecast>,
}

impl WeatherSnapshot {
    pub fn merge(current: CurrentConditions, forecast: Forecast) -> Self {
        Self {
            current,
            hourly: forecast.hourly,
            daily: forecast.daily,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aqi_labels_cover_one_through_six() {
        let labels: Vec<_> = (1..=6).map(|i| AqiLevel::from_index(Some(i)).label()).collect();
        assert_eq!(
            labels,
            [
                "Good",
                "Moderate",
                "Unhealthy for Sensitive",
                "Unhealthy",
                "Very Unhealthy",
                "Hazardous"
            ]
        );
    }

    #[test]
    fn aqi_out_of_range_is_unknown() {
        for index in [None, Some(0), Some(7), Some(-1), Some(i64::MAX)] {
            let level = AqiLevel::from_index(index);
            assert_eq!(level, AqiLevel::Unknown);
            assert_eq!(level.label(), "Unknown");
            assert_eq!(level.css_class(), "");
        }
    }

    #[test]
    fn coordinates_format_as_lat_lon() {
        let q = LocationQuery::from_coordinates(40.71, -74.01);
        assert_eq!(q.as_str(), "40.71,-74.01");
    }

    #[test]
    fn suggestion_label_joins_parts() {
        let s = Suggestion {
            name: "London".into(),
            region: "City of London, Greater London".into(),
            country: "United Kingdom".into(),
        };
        assert_eq!(s.label(), "London, City of London, Greater London, United Kingdom");
    }
}
