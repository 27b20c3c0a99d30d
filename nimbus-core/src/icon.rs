//! Condition code to icon mapping.
//!
//! Codes are WeatherAPI.com condition codes
//! (<https://www.weatherapi.com/docs/weather_conditions.json>).

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconId {
    Sun,
    Moon,
    CloudSun,
    CloudMoon,
    Cloud,
    Smog,
    Wind,
    CloudDrizzle,
    CloudRain,
    CloudShowersHeavy,
    Snowflake,
    Bolt,
}

impl IconId {
    /// Font Awesome class list for web front ends.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Sun => "fas fa-sun",
            Self::Moon => "fas fa-moon",
            Self::CloudSun => "fas fa-cloud-sun",
            Self::CloudMoon => "fas fa-cloud-moon",
            Self::Cloud => "fas fa-cloud",
            Self::Smog => "fas fa-smog",
            Self::Wind => "fas fa-wind",
            Self::CloudDrizzle => "fas fa-cloud-drizzle",
            Self::CloudRain => "fas fa-cloud-rain",
            Self::CloudShowersHeavy => "fas fa-cloud-showers-heavy",
            Self::Snowflake => "fas fa-snowflake",
            Self::Bolt => "fas fa-bolt",
        }
    }

    /// Single glyph for terminal output.
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Sun => "☀",
            Self::Moon => "☾",
            Self::CloudSun => "⛅",
            Self::CloudMoon => "☁☾",
            Self::Cloud => "☁",
            Self::Smog => "🌫",
            Self::Wind => "🌬",
            Self::CloudDrizzle => "🌦",
            Self::CloudRain => "🌧",
            Self::CloudShowersHeavy => "⛆",
            Self::Snowflake => "❄",
            Self::Bolt => "⚡",
        }
    }
}

/// Total over all integers: unknown codes get [`IconId::Cloud`].
pub fn resolve_icon(code: i64, is_day: bool) -> IconId {
    match code {
        1000 if is_day => IconId::Sun,
        1000 => IconId::Moon,
        1003 if is_day => IconId::CloudSun,
        1003 => IconId::CloudMoon,
        1006 | 1009 => IconId::Cloud,
        1030 | 1135 | 1147 => IconId::Smog,
        1114 | 1117 => IconId::Wind,
        1150 | 1153 => IconId::CloudDrizzle,
        1087 | 1273 | 1276 | 1279 | 1282 => IconId::Bolt,
        1066 | 1210 | 1213 | 1216 | 1219 | 1222 | 1225 | 1237 | 1255 | 1258 | 1261 | 1264 => {
            IconId::Snowflake
        }
        1192 | 1195 | 1201 | 1243 | 1246 => IconId::CloudShowersHeavy,
        1063 | 1069 | 1072 | 1168 | 1171 | 1180 | 1183 | 1186 | 1189 | 1198 | 1204 | 1207
        | 1240 | 1249 | 1252 => IconId::CloudRain,
        _ => IconId::Cloud,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &[(i64, IconId)] = &[
        (1006, IconId::Cloud),
        (1009, IconId::Cloud),
        (1030, IconId::Smog),
        (1063, IconId::CloudRain),
        (1066, IconId::Snowflake),
        (1069, IconId::CloudRain),
        (1072, IconId::CloudRain),
        (1087, IconId::Bolt),
        (1114, IconId::Wind),
        (1117, IconId::Wind),
        (1135, IconId::Smog),
        (1147, IconId::Smog),
        (1150, IconId::CloudDrizzle),
        (1153, IconId::CloudDrizzle),
        (1168, IconId::CloudRain),
        (1171, IconId::CloudRain),
        (1180, IconId::CloudRain),
        (1183, IconId::CloudRain),
        (1186, IconId::CloudRain),
        (1189, IconId::CloudRain),
        (1192, IconId::CloudShowersHeavy),
        (1195, IconId::CloudShowersHeavy),
        (1198, IconId::CloudRain),
        (1201, IconId::CloudShowersHeavy),
        (1204, IconId::CloudRain),
        (1207, IconId::CloudRain),
        (1210, IconId::Snowflake),
        (1213, IconId::Snowflake),
        (1216, IconId::Snowflake),
        (1219, IconId::Snowflake),
        (1222, IconId::Snowflake),
        (1225, IconId::Snowflake),
        (1237, IconId::Snowflake),
        (1240, IconId::CloudRain),
        (1243, IconId::CloudShowersHeavy),
        (1246, IconId::CloudShowersHeavy),
        (1249, IconId::CloudRain),
        (1252, IconId::CloudRain),
        (1255, IconId::Snowflake),
        (1258, IconId::Snowflake),
        (1261, IconId::Snowflake),
        (1264, IconId::Snowflake),
        (1273, IconId::Bolt),
        (1276, IconId::Bolt),
        (1279, IconId::Bolt),
        (1282, IconId::Bolt),
    ];

    #[test]
    fn known_codes_ignore_day_flag() {
        for &(code, icon) in TABLE {
            assert_eq!(resolve_icon(code, true), icon, "code {code} by day");
            assert_eq!(resolve_icon(code, false), icon, "code {code} by night");
        }
    }

    #[test]
    fn clear_and_partly_cloudy_have_night_variants() {
        assert_eq!(resolve_icon(1000, true), IconId::Sun);
        assert_eq!(resolve_icon(1000, false), IconId::Moon);
        assert_eq!(resolve_icon(1003, true), IconId::CloudSun);
        assert_eq!(resolve_icon(1003, false), IconId::CloudMoon);
    }

    #[test]
    fn unknown_codes_fall_back_to_cloud() {
        for code in [i64::MIN, -1, 0, 999, 1001, 1300, i64::MAX] {
            assert_eq!(resolve_icon(code, true), IconId::Cloud);
            assert_eq!(resolve_icon(code, false), IconId::Cloud);
        }
    }

    #[test]
    fn css_classes() {
        assert_eq!(IconId::Sun.css_class(), "fas fa-sun");
        assert_eq!(IconId::CloudShowersHeavy.css_class(), "fas fa-cloud-showers-heavy");
    }
}
