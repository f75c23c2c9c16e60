use std::fmt;
use std::str::FromStr;

use crate::error::WxError;
use crate::units::Unit;

/// A value as it moves through conversion and formatting.
#[derive(Debug, Clone, PartialEq)]
pub enum Reading {
    Number(f64),
    /// A label produced by a lookup, e.g. a cardinal direction.
    Text(String),
    /// No wind direction because there is no wind.
    Calm,
    /// No reading at all.
    Missing,
}

impl Reading {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Reading::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// True for readings that render as a placeholder: absent or NaN.
    pub fn is_unavailable(&self) -> bool {
        match self {
            Reading::Number(value) => value.is_nan(),
            Reading::Missing => true,
            Reading::Text(_) | Reading::Calm => false,
        }
    }
}

impl From<Option<f64>> for Reading {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Reading::Missing, Reading::Number)
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reading::Number(value) if value.is_nan() => f.write_str("-"),
            Reading::Number(value) => write!(f, "{value}"),
            Reading::Text(text) => f.write_str(text),
            Reading::Calm => f.write_str("Calm"),
            Reading::Missing => f.write_str("-"),
        }
    }
}

/// A raw measurement in the unit it was reported in.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub value: Option<f64>,
    pub unit: Unit,
}

impl Measurement {
    pub fn new(value: Option<f64>, unit: Unit) -> Self {
        Self { value, unit }
    }

    pub fn parse(value: Option<f64>, tag: &str) -> Self {
        Self {
            value,
            unit: Unit::from_tag(tag),
        }
    }
}

/// A converted reading with its unit, ready for formatting.
///
/// `trailer` holds tokens the caller wants carried after the formatted
/// value unchanged (e.g. "ago" after a time delta).
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub reading: Reading,
    pub unit: Unit,
    pub trailer: Vec<String>,
}

impl Observation {
    pub fn new(reading: Reading, unit: Unit) -> Self {
        Self {
            reading,
            unit,
            trailer: Vec::new(),
        }
    }

    pub fn with_trailer(mut self, token: impl Into<String>) -> Self {
        self.trailer.push(token.into());
        self
    }
}

impl From<Measurement> for Observation {
    fn from(measurement: Measurement) -> Self {
        Observation::new(Reading::from(measurement.value), measurement.unit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Temp,
    Pressure,
    Wind,
    Direction,
    Precip,
    Humidity,
    Radiation,
    UV,
    Battery,
    StrikeCount,
    StrikeDistance,
    StrikeFrequency,
    TimeDelta,
}

const TEMP_UNITS: &[Unit] = &[Unit::Celsius, Unit::Fahrenheit];
const PRESSURE_UNITS: &[Unit] = &[
    Unit::Millibar,
    Unit::MillibarPerHour,
    Unit::Hectopascal,
    Unit::HectopascalPerHour,
    Unit::InchesHg,
    Unit::InchesHgPerHour,
    Unit::MillimetresHg,
    Unit::MillimetresHgPerHour,
];
const WIND_UNITS: &[Unit] = &[
    Unit::MetresPerSecond,
    Unit::MilesPerHour,
    Unit::Knots,
    Unit::KilometresPerHour,
    Unit::Beaufort,
];
const DIRECTION_UNITS: &[Unit] = &[Unit::Degrees];
const PRECIP_UNITS: &[Unit] = &[
    Unit::Millimetres,
    Unit::MillimetresPerHour,
    Unit::Inches,
    Unit::InchesPerHour,
    Unit::Centimetres,
    Unit::CentimetresPerHour,
];
const HUMIDITY_UNITS: &[Unit] = &[Unit::Percent];
const RADIATION_UNITS: &[Unit] = &[Unit::WattsPerSquareMetre];
const UV_UNITS: &[Unit] = &[Unit::UvIndex];
const BATTERY_UNITS: &[Unit] = &[Unit::Volts];
const STRIKE_COUNT_UNITS: &[Unit] = &[Unit::Count];
const STRIKE_DISTANCE_UNITS: &[Unit] = &[Unit::Kilometres, Unit::Miles];
const STRIKE_FREQUENCY_UNITS: &[Unit] = &[Unit::PerMinute];
const TIME_DELTA_UNITS: &[Unit] = &[Unit::Seconds];

impl Category {
    pub const ALL: [Category; 13] = [
        Category::Temp,
        Category::Pressure,
        Category::Wind,
        Category::Direction,
        Category::Precip,
        Category::Humidity,
        Category::Radiation,
        Category::UV,
        Category::Battery,
        Category::StrikeCount,
        Category::StrikeDistance,
        Category::StrikeFrequency,
        Category::TimeDelta,
    ];

    /// Units whose numeric values this category knows how to format.
    /// Anything else is passed through as-is.
    pub fn units(self) -> &'static [Unit] {
        match self {
            Category::Temp => TEMP_UNITS,
            Category::Pressure => PRESSURE_UNITS,
            Category::Wind => WIND_UNITS,
            Category::Direction => DIRECTION_UNITS,
            Category::Precip => PRECIP_UNITS,
            Category::Humidity => HUMIDITY_UNITS,
            Category::Radiation => RADIATION_UNITS,
            Category::UV => UV_UNITS,
            Category::Battery => BATTERY_UNITS,
            Category::StrikeCount => STRIKE_COUNT_UNITS,
            Category::StrikeDistance => STRIKE_DISTANCE_UNITS,
            Category::StrikeFrequency => STRIKE_FREQUENCY_UNITS,
            Category::TimeDelta => TIME_DELTA_UNITS,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Temp => "Temp",
            Category::Pressure => "Pressure",
            Category::Wind => "Wind",
            Category::Direction => "Direction",
            Category::Precip => "Precip",
            Category::Humidity => "Humidity",
            Category::Radiation => "Radiation",
            Category::UV => "UV",
            Category::Battery => "Battery",
            Category::StrikeCount => "StrikeCount",
            Category::StrikeDistance => "StrikeDistance",
            Category::StrikeFrequency => "StrikeFrequency",
            Category::TimeDelta => "TimeDelta",
        }
    }
}

impl FromStr for Category {
    type Err = WxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.name() == s)
            .ok_or_else(|| WxError::UnknownCategory(s.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
