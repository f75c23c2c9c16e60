//! Hourly forecast selection and icon mapping.

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use log::{debug, warn};
use serde::Deserialize;

use crate::config::Config;
use crate::error::{Result, WxError};
use crate::units::{convert, Unit, UnitSystem};
use crate::weather::{Measurement, Reading};

/// Placeholder for every forecast field when no forecast is available.
pub const MISSING: &str = "--";

/// Icon id shown when the forecast or its condition code is unavailable.
pub const UNAVAILABLE: &str = "ForecastUnavailable";

#[derive(Deserialize, Debug, Default)]
pub struct Response {
    pub forecast: Option<Body>,
}

#[derive(Deserialize, Debug, Default)]
pub struct Body {
    pub hourly: Option<Vec<Hourly>>,
}

/// One hourly forecast period.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Hourly {
    /// Period start, epoch seconds
    pub time: i64,
    pub air_temperature: Option<f64>,
    pub wind_avg: Option<f64>,
    pub wind_direction: Option<f64>,
    pub precip_probability: Option<f64>,
    #[serde(default)]
    pub icon: String,
}

impl Response {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The hourly series, or `None` if the response carried no forecast.
    pub fn into_hourly(self) -> Option<Vec<Hourly>> {
        self.forecast.and_then(|body| body.hourly)
    }

    /// Decode a response into its hourly series. A response without one
    /// counts as a failed retrieval.
    pub fn hourly_from_json(json: &str) -> Result<Vec<Hourly>> {
        Self::from_json(json)?
            .into_hourly()
            .ok_or(WxError::MissingForecast)
    }
}

/// Outcome of [`ForecastCache::refresh`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    Replaced,
    /// The fetch failed and the previous series was kept; the caller
    /// should schedule another attempt.
    KeptStale,
}

/// Last successfully retrieved forecast series.
#[derive(Debug, Default)]
pub struct ForecastCache {
    series: Vec<Hourly>,
}

impl ForecastCache {
    pub fn series(&self) -> &[Hourly] {
        &self.series
    }

    /// Replace the series wholesale on success, keep the stale one on
    /// failure.
    pub fn refresh<E: fmt::Display>(&mut self, fetched: Result<Vec<Hourly>, E>) -> Refresh {
        match fetched {
            Ok(series) => {
                debug!("forecast refreshed with {} hourly periods", series.len());
                self.series = series;
                Refresh::Replaced
            }
            Err(err) => {
                warn!(
                    "forecast refresh failed, keeping {} stale periods: {err}",
                    self.series.len()
                );
                Refresh::KeptStale
            }
        }
    }
}

/// Pick the forecast period for `now` and render its start as `HH:MM` in
/// `tz`.
///
/// The selected period is the first whose start is strictly after `now`,
/// and that same start is reported as the valid-until time.
pub fn select_current(series: &[Hourly], now: i64, tz: Tz) -> Result<(&Hourly, String)> {
    let index = series.partition_point(|hour| hour.time <= now);
    let selected = series.get(index).ok_or(WxError::ForecastIndex {
        index,
        len: series.len(),
    })?;
    let valid = local_time(selected.time, tz)?.format("%H:%M").to_string();
    Ok((selected, valid))
}

fn local_time(epoch: i64, tz: Tz) -> Result<DateTime<Tz>> {
    Utc.timestamp_opt(epoch, 0)
        .single()
        .map(|utc| utc.with_timezone(&tz))
        .ok_or(WxError::InvalidTimestamp(epoch))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Id(&'static str),
    Unavailable,
}

impl Icon {
    pub fn as_str(&self) -> &'static str {
        match *self {
            Icon::Id(id) => id,
            Icon::Unavailable => UNAVAILABLE,
        }
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const ICONS: [(&str, &str); 19] = [
    ("clear-day", "1"),
    ("clear-night", "0"),
    ("rainy", "15"),
    ("possibly-rainy-day", "10"),
    ("possibly-rainy-night", "9"),
    ("snow", "27"),
    ("possibly-snow-day", "23"),
    ("possibly-snow-night", "22"),
    ("sleet", "18"),
    ("possibly-sleet-day", "17"),
    ("possibly-sleet-night", "16"),
    ("thunderstorm", "30"),
    ("possibly-thunderstorm-day", "29"),
    ("possibly-thunderstorm-night", "28"),
    ("windy", "wind"),
    ("foggy", "6"),
    ("cloudy", "7"),
    ("partly-cloudy-day", "3"),
    ("partly-cloudy-night", "2"),
];

/// Map a condition code to its icon. Case sensitive; unknown codes are
/// [`Icon::Unavailable`].
pub fn icon_for(code: &str) -> Icon {
    ICONS
        .iter()
        .find(|(known, _)| *known == code)
        .map_or(Icon::Unavailable, |&(_, id)| Icon::Id(id))
}

/// Forecast fields ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Conditions {
    pub valid: String,
    /// Value and unit label
    pub temp: [String; 2],
    pub wind_dir: String,
    /// Value and unit label
    pub wind_spd: [String; 2],
    pub precip: String,
    pub icon: Icon,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPanel {
    pub time: DateTime<Tz>,
    pub conditions: Option<Conditions>,
}

impl ForecastPanel {
    pub fn valid(&self) -> &str {
        self.conditions.as_ref().map_or(MISSING, |c| c.valid.as_str())
    }

    pub fn temp(&self) -> Vec<&str> {
        self.conditions
            .as_ref()
            .map_or(vec![MISSING], |c| c.temp.iter().map(String::as_str).collect())
    }

    pub fn wind_dir(&self) -> &str {
        self.conditions
            .as_ref()
            .map_or(MISSING, |c| c.wind_dir.as_str())
    }

    pub fn wind_spd(&self) -> Vec<&str> {
        self.conditions
            .as_ref()
            .map_or(vec![MISSING], |c| c.wind_spd.iter().map(String::as_str).collect())
    }

    pub fn precip(&self) -> &str {
        self.conditions.as_ref().map_or(MISSING, |c| c.precip.as_str())
    }

    pub fn weather(&self) -> Icon {
        self.conditions.as_ref().map_or(Icon::Unavailable, |c| c.icon)
    }
}

/// Build the forecast panel for `now` (epoch seconds).
///
/// An empty series gives the unavailable panel. A non-empty series with no
/// period after `now` is an error.
pub fn extract(series: &[Hourly], now: i64, config: &Config) -> Result<ForecastPanel> {
    let tz = config.timezone()?;
    let time = local_time(now, tz)?;

    if series.is_empty() {
        debug!("no forecast periods available");
        return Ok(ForecastPanel {
            time,
            conditions: None,
        });
    }

    let (hour, valid) = select_current(series, now, tz)?;

    let temp = convert(
        &Measurement::new(hour.air_temperature, Unit::Celsius),
        config.units.temp,
    );
    let wind_spd = convert(
        &Measurement::new(hour.wind_avg, Unit::MetresPerSecond),
        config.units.wind,
    );
    let wind_dir = convert(
        &Measurement::new(hour.wind_direction, Unit::Degrees),
        UnitSystem::Cardinal,
    );

    Ok(ForecastPanel {
        time,
        conditions: Some(Conditions {
            valid,
            temp: [fixed(&temp.reading, 1), temp.unit.label().to_string()],
            wind_dir: wind_dir.reading.to_string(),
            wind_spd: [fixed(&wind_spd.reading, 0), wind_spd.unit.label().to_string()],
            precip: fixed(&Reading::from(hour.precip_probability), 0),
            icon: icon_for(&hour.icon.replace("cc-", "")),
        }),
    })
}

fn fixed(reading: &Reading, decimals: usize) -> String {
    match reading {
        Reading::Number(value) if !value.is_nan() => format!("{value:.decimals$}"),
        other => other.to_string(),
    }
}
