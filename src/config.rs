use std::fs;
use std::path::Path;

use chrono_tz::Tz;
use serde::Deserialize;

use crate::error::{Result, WxError};
use crate::units::UnitSystem;
use crate::weather::Category;

/// Station configuration: the unit system chosen for each kind of
/// measurement and the timezone forecast times are shown in.
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub units: UnitsConfig,
    pub station: StationConfig,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct UnitsConfig {
    pub temp: UnitSystem,
    pub pressure: UnitSystem,
    pub wind: UnitSystem,
    pub direction: UnitSystem,
    pub precip: UnitSystem,
    pub distance: UnitSystem,
}

impl Default for UnitsConfig {
    fn default() -> Self {
        Self {
            temp: UnitSystem::C,
            pressure: UnitSystem::Mb,
            wind: UnitSystem::Mps,
            direction: UnitSystem::Degrees,
            precip: UnitSystem::Mm,
            distance: UnitSystem::Km,
        }
    }
}

impl UnitsConfig {
    /// Unit system to convert into before formatting `category`, if the
    /// category is convertible at all.
    pub fn system_for(&self, category: Category) -> Option<UnitSystem> {
        match category {
            Category::Temp => Some(self.temp),
            Category::Pressure => Some(self.pressure),
            Category::Wind => Some(self.wind),
            Category::Direction => Some(self.direction),
            Category::Precip => Some(self.precip),
            Category::StrikeDistance => Some(self.distance),
            _ => None,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct StationConfig {
    /// IANA timezone identifier, e.g. "America/Chicago"
    pub timezone: String,
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    pub fn timezone(&self) -> Result<Tz> {
        self.station
            .timezone
            .parse()
            .map_err(|_| WxError::UnknownTimezone(self.station.timezone.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_fills_defaults() {
        let config = Config::from_json(
            r#"{"units": {"temp": "f", "wind": "lfm"}, "station": {"timezone": "Europe/London"}}"#,
        )
        .unwrap();
        assert_eq!(config.units.temp, UnitSystem::F);
        assert_eq!(config.units.wind, UnitSystem::Lfm);
        assert_eq!(config.units.pressure, UnitSystem::Mb);
        assert_eq!(config.timezone().unwrap(), chrono_tz::Europe::London);
    }

    #[test]
    fn unknown_unit_system_is_rejected() {
        assert!(Config::from_json(r#"{"units": {"temp": "kelvin"}}"#).is_err());
    }

    #[test]
    fn unknown_timezone_is_reported() {
        let mut config = Config::default();
        config.station.timezone = "Mars/Olympus".to_string();
        assert!(matches!(
            config.timezone(),
            Err(WxError::UnknownTimezone(tz)) if tz == "Mars/Olympus"
        ));
    }

    #[test]
    fn only_convertible_categories_have_systems() {
        let units = UnitsConfig::default();
        assert_eq!(units.system_for(Category::Wind), Some(UnitSystem::Mps));
        assert_eq!(units.system_for(Category::Humidity), None);
    }
}
