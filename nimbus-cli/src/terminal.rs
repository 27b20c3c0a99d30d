//! [`DisplayPort`] that collects region values and prints them as text.

use nimbus_core::{
    IconId, Suggestion, Theme,
    render::{DaySlot, DisplayPort, HourSlot, RainDrop, Region, ViewState, WeatherTheme},
};
use std::{
    collections::BTreeMap,
    fmt::{self, Write},
};

#[derive(Debug)]
pub struct TerminalDisplay {
    theme: Theme,
    texts: BTreeMap<Region, String>,
    icons: BTreeMap<Region, IconId>,
    hourly: Vec<HourSlot>,
    daily: Vec<DaySlot>,
    weather_theme: Option<WeatherTheme>,
    rain_drops: usize,
    view: Option<ViewState>,
    suggestions: Option<Vec<Suggestion>>,
}

impl TerminalDisplay {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            texts: BTreeMap::new(),
            icons: BTreeMap::new(),
            hourly: Vec::new(),
            daily: Vec::new(),
            weather_theme: None,
            rain_drops: 0,
            view: None,
            suggestions: None,
        }
    }

    pub fn print(&self) {
        print!("{}", self.to_text());
    }

    fn text(&self, region: Region) -> &str {
        self.texts.get(&region).map(String::as_str).unwrap_or("")
    }

    fn glyph(&self, region: Region) -> &'static str {
        self.icons.get(&region).map(IconId::glyph).unwrap_or(" ")
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_view(&mut out);
        out
    }

    fn write_view(&self, out: &mut String) -> fmt::Result {
        match &self.view {
            Some(ViewState::Error(message)) => return writeln!(out, "{message}"),
            Some(ViewState::Content) => {}
            Some(ViewState::Loading) | None => return Ok(()),
        }

        writeln!(
            out,
            "{} {}  ({})  [{}]",
            self.theme.toggle_icon().glyph(),
            self.text(Region::LocationName),
            self.text(Region::LocationDetails),
            self.text(Region::LocalTime),
        )?;
        writeln!(
            out,
            "{} {}  {}  {}",
            self.glyph(Region::WeatherIcon),
            self.text(Region::CurrentTemp),
            self.text(Region::Condition),
            self.text(Region::FeelsLike),
        )?;
        writeln!(
            out,
            "Visibility {} | Humidity {} | Wind {} | Pressure {} | UV {} | Precipitation {}",
            self.text(Region::Visibility),
            self.text(Region::Humidity),
            self.text(Region::WindSpeed),
            self.text(Region::Pressure),
            self.text(Region::UvIndex),
            self.text(Region::Precipitation),
        )?;

        if self.texts.contains_key(&Region::AqiLabel) {
            writeln!(
                out,
                "Air quality {} ({}) | PM2.5 {} | PM10 {} | O3 {} | NO2 {}",
                self.text(Region::AqiValue),
                self.text(Region::AqiLabel),
                self.text(Region::Pm25),
                self.text(Region::Pm10),
                self.text(Region::O3),
                self.text(Region::No2),
            )?;
        }

        if let Some(theme) = self.weather_theme {
            write!(out, "Background: {}", theme.css_class())?;
            if self.rain_drops > 0 {
                write!(out, " ({} drops)", self.rain_drops)?;
            }
            out.push('\n');
        }

        if let Some(suggestions) = &self.suggestions {
            out.push_str("\nDid you mean\n");
            for s in suggestions {
                writeln!(out, "  {}", s.label())?;
            }
        }

        if !self.hourly.is_empty() {
            out.push_str("\nHourly\n");
            for slot in &self.hourly {
                writeln!(
                    out,
                    "  {:>5}  {}  {:>4}  {}",
                    slot.label,
                    slot.icon.glyph(),
                    slot.temp,
                    slot.condition
                )?;
            }
        }

        if !self.daily.is_empty() {
            out.push_str("\nDaily\n");
            for slot in &self.daily {
                writeln!(
                    out,
                    "  {:<9}  {}  {:>4} / {:<4}  {}",
                    slot.label,
                    slot.icon.glyph(),
                    slot.high,
                    slot.low,
                    slot.condition
                )?;
            }
        }

        Ok(())
    }
}

impl DisplayPort for TerminalDisplay {
    fn set_text(&mut self, region: Region, text: &str) {
        self.texts.insert(region, text.to_string());
    }

    fn set_icon(&mut self, region: Region, icon: IconId) {
        self.icons.insert(region, icon);
    }

    // Severity classes have no terminal styling.
    fn set_class(&mut self, _region: Region, _class: &str) {}

    fn set_hourly(&mut self, slots: &[HourSlot]) {
        self.hourly = slots.to_vec();
    }

    fn set_daily(&mut self, slots: &[DaySlot]) {
        self.daily = slots.to_vec();
    }

    fn clear_weather_theme(&mut self) {
        self.weather_theme = None;
    }

    fn set_weather_theme(&mut self, theme: WeatherTheme) {
        self.weather_theme = Some(theme);
    }

    fn set_rain(&mut self, drops: &[RainDrop]) {
        self.rain_drops = drops.len();
    }

    fn set_view(&mut self, view: &ViewState) {
        self.view = Some(view.clone());
    }

    fn set_suggestions(&mut self, suggestions: Option<&[Suggestion]>) {
        self.suggestions = suggestions.map(<[Suggestion]>::to_vec);
    }
}
