use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::Deserialize;

use crate::error::WxError;
use crate::weather::{Measurement, Observation, Reading};

pub mod temperature {
    pub fn c2f(temp_c: f64) -> f64 {
        temp_c * 9.0 / 5.0 + 32.0
    }

    #[test]
    fn test_temperature() {
        assert_eq!(c2f(0.0), 32.0);
        assert_eq!(c2f(100.0), 212.0);
        assert_eq!(c2f(-40.0), -40.0);
    }
}

pub mod pressure {
    const INHG_PER_MB: f64 = 0.0295301;
    const MMHG_PER_MB: f64 = 0.750063;

    pub fn mb2inhg(mb: f64) -> f64 {
        mb * INHG_PER_MB
    }

    pub fn mb2mmhg(mb: f64) -> f64 {
        mb * MMHG_PER_MB
    }

    #[test]
    fn test_pressure() {
        assert!((mb2inhg(1013.25) - 29.92).abs() < 0.01);
        assert!((mb2mmhg(1013.25) - 760.0).abs() < 0.01);
    }
}

pub mod speed {
    const MPH_PER_MPS: f64 = 2.2369362920544;
    const KTS_PER_MPS: f64 = 1.9438;
    const KPH_PER_MPS: f64 = 3.6;

    pub fn mps2mph(mps: f64) -> f64 {
        mps * MPH_PER_MPS
    }

    pub fn mps2kts(mps: f64) -> f64 {
        mps * KTS_PER_MPS
    }

    pub fn mps2kph(mps: f64) -> f64 {
        mps * KPH_PER_MPS
    }

    #[test]
    fn test_speed() {
        assert_eq!(mps2kph(10.0), 36.0);
        assert!((mps2mph(10.0) - 22.369362920544).abs() < 1e-9);
        assert!((mps2kts(10.0) - 19.438).abs() < 1e-9);
    }
}

pub mod precip {
    const IN_PER_MM: f64 = 0.0393701;
    const CM_PER_MM: f64 = 0.1;

    pub fn mm2in(mm: f64) -> f64 {
        mm * IN_PER_MM
    }

    pub fn mm2cm(mm: f64) -> f64 {
        mm * CM_PER_MM
    }
}

pub mod distance {
    const MI_PER_KM: f64 = 0.62137;

    pub fn km2mi(km: f64) -> f64 {
        km * MI_PER_KM
    }
}

pub mod direction {
    const COMPASS: [&str; 16] = [
        "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW",
        "NW", "NNW",
    ];
    pub fn degree_to_compass(deg: f64) -> &'static str {
        let deg = (deg % 360.0) + 360.0;
        let val = (deg / 22.5 + 0.5) as usize;
        let idx = val % 16;
        COMPASS[idx]
    }

    #[test]
    fn test_degree_to_compass() {
        assert_eq!(degree_to_compass(0.0), "N");
        assert_eq!(degree_to_compass(90.0), "E");
        assert_eq!(degree_to_compass(180.0), "S");
        assert_eq!(degree_to_compass(270.0), "W");
        assert_eq!(degree_to_compass(360.0), "N");
        assert_eq!(degree_to_compass(-45.0), "NW");
    }
}

pub mod beaufort {
    /// Upper wind speed (m/s) of forces 0 through 11; anything faster is 12.
    const LIMITS: [f64; 12] = [
        0.3, 1.6, 3.4, 5.5, 8.0, 10.8, 13.9, 17.2, 20.8, 24.5, 28.5, 32.7,
    ];

    pub fn scale(mps: f64) -> f64 {
        if mps.is_nan() {
            return f64::NAN;
        }
        LIMITS.iter().take_while(|limit| mps >= **limit).count() as f64
    }

    #[test]
    fn test_scale() {
        assert_eq!(scale(0.0), 0.0);
        assert_eq!(scale(0.3), 1.0);
        assert_eq!(scale(5.0), 3.0);
        assert_eq!(scale(40.0), 12.0);
        assert!(scale(f64::NAN).is_nan());
    }
}

/// The unit a value is currently expressed in.
///
/// Tags parse from the lowercase strings used by the station feeds. Tags
/// outside the known set are kept verbatim in [`Unit::Other`] so they can
/// flow through conversion and formatting untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Unit {
    Celsius,
    Fahrenheit,
    Millibar,
    MillibarPerHour,
    Hectopascal,
    HectopascalPerHour,
    InchesHg,
    InchesHgPerHour,
    MillimetresHg,
    MillimetresHgPerHour,
    MetresPerSecond,
    MilesPerHour,
    Knots,
    KilometresPerHour,
    Beaufort,
    Degrees,
    Cardinal,
    Millimetres,
    MillimetresPerHour,
    Inches,
    InchesPerHour,
    Centimetres,
    CentimetresPerHour,
    Kilometres,
    Miles,
    Percent,
    WattsPerSquareMetre,
    UvIndex,
    Volts,
    Count,
    PerMinute,
    Seconds,
    Other(String),
}

impl Unit {
    pub fn tag(&self) -> &str {
        match self {
            Unit::Celsius => "c",
            Unit::Fahrenheit => "f",
            Unit::Millibar => "mb",
            Unit::MillibarPerHour => "mb/hr",
            Unit::Hectopascal => "hpa",
            Unit::HectopascalPerHour => "hpa/hr",
            Unit::InchesHg => "inhg",
            Unit::InchesHgPerHour => "inhg/hr",
            Unit::MillimetresHg => "mmhg",
            Unit::MillimetresHgPerHour => "mmhg/hr",
            Unit::MetresPerSecond => "mps",
            Unit::MilesPerHour => "mph",
            Unit::Knots => "kts",
            Unit::KilometresPerHour => "kph",
            Unit::Beaufort => "bft",
            Unit::Degrees => "degrees",
            Unit::Cardinal => "cardinal",
            Unit::Millimetres => "mm",
            Unit::MillimetresPerHour => "mm/hr",
            Unit::Inches => "in",
            Unit::InchesPerHour => "in/hr",
            Unit::Centimetres => "cm",
            Unit::CentimetresPerHour => "cm/hr",
            Unit::Kilometres => "km",
            Unit::Miles => "mi",
            Unit::Percent => "%",
            Unit::WattsPerSquareMetre => "w/m2",
            Unit::UvIndex => "index",
            Unit::Volts => "v",
            Unit::Count => "count",
            Unit::PerMinute => "/min",
            Unit::Seconds => "s",
            Unit::Other(tag) => tag.as_str(),
        }
    }

    /// Display label shown next to a value in this unit, in the console's
    /// markup (`[sup]` for superscripts).
    pub fn label(&self) -> &str {
        match self {
            Unit::Celsius => " [sup]o[/sup]C",
            Unit::Fahrenheit => " [sup]o[/sup]F",
            Unit::Millibar => " mb",
            Unit::MillibarPerHour => " mb/hr",
            Unit::Hectopascal => " hpa",
            Unit::HectopascalPerHour => " hpa/hr",
            Unit::InchesHg => " inHg",
            Unit::InchesHgPerHour => " inHg/hr",
            Unit::MillimetresHg => " mmHg",
            Unit::MillimetresHgPerHour => " mmHg/hr",
            Unit::MetresPerSecond => "m/s",
            Unit::MilesPerHour => "mph",
            Unit::Knots => "kts",
            Unit::KilometresPerHour => "km/h",
            Unit::Beaufort => "bft",
            Unit::Degrees => "[sup]o[/sup]",
            Unit::Cardinal => "",
            Unit::Millimetres => " mm",
            Unit::MillimetresPerHour => " mm/hr",
            Unit::Inches => "\"",
            Unit::InchesPerHour => " in/hr",
            Unit::Centimetres => " cm",
            Unit::CentimetresPerHour => " cm/hr",
            Unit::Kilometres => " km",
            Unit::Miles => "miles",
            Unit::Percent => " %",
            Unit::WattsPerSquareMetre => "W m[sup]-2[/sup]",
            Unit::UvIndex => " index",
            Unit::Volts => " v",
            Unit::Count => " count",
            Unit::PerMinute => " /min",
            Unit::Seconds => " s",
            Unit::Other(tag) => tag.as_str(),
        }
    }

    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "c" => Unit::Celsius,
            "f" => Unit::Fahrenheit,
            "mb" => Unit::Millibar,
            "mb/hr" => Unit::MillibarPerHour,
            "hpa" => Unit::Hectopascal,
            "hpa/hr" => Unit::HectopascalPerHour,
            "inhg" => Unit::InchesHg,
            "inhg/hr" => Unit::InchesHgPerHour,
            "mmhg" => Unit::MillimetresHg,
            "mmhg/hr" => Unit::MillimetresHgPerHour,
            "mps" => Unit::MetresPerSecond,
            "mph" => Unit::MilesPerHour,
            "kts" => Unit::Knots,
            "kph" => Unit::KilometresPerHour,
            "bft" => Unit::Beaufort,
            "degrees" => Unit::Degrees,
            "cardinal" => Unit::Cardinal,
            "mm" => Unit::Millimetres,
            "mm/hr" => Unit::MillimetresPerHour,
            "in" => Unit::Inches,
            "in/hr" => Unit::InchesPerHour,
            "cm" => Unit::Centimetres,
            "cm/hr" => Unit::CentimetresPerHour,
            "km" => Unit::Kilometres,
            "mi" => Unit::Miles,
            "%" => Unit::Percent,
            "w/m2" => Unit::WattsPerSquareMetre,
            "index" => Unit::UvIndex,
            "v" => Unit::Volts,
            "count" => Unit::Count,
            "/min" => Unit::PerMinute,
            "s" => Unit::Seconds,
            other => Unit::Other(other.to_string()),
        }
    }
}

impl FromStr for Unit {
    type Err = Infallible;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Ok(Unit::from_tag(tag))
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Target unit family selected by the user for one kind of measurement.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    C,
    F,
    Inhg,
    Mmhg,
    Hpa,
    Mb,
    Mph,
    Lfm,
    Kts,
    Kph,
    Bft,
    Mps,
    Degrees,
    Cardinal,
    In,
    Cm,
    Mm,
    Km,
    Mi,
}

impl FromStr for UnitSystem {
    type Err = WxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let system = match s {
            "c" => UnitSystem::C,
            "f" => UnitSystem::F,
            "inhg" => UnitSystem::Inhg,
            "mmhg" => UnitSystem::Mmhg,
            "hpa" => UnitSystem::Hpa,
            "mb" => UnitSystem::Mb,
            "mph" => UnitSystem::Mph,
            "lfm" => UnitSystem::Lfm,
            "kts" => UnitSystem::Kts,
            "kph" => UnitSystem::Kph,
            "bft" => UnitSystem::Bft,
            "mps" => UnitSystem::Mps,
            "degrees" => UnitSystem::Degrees,
            "cardinal" => UnitSystem::Cardinal,
            "in" => UnitSystem::In,
            "cm" => UnitSystem::Cm,
            "mm" => UnitSystem::Mm,
            "km" => UnitSystem::Km,
            "mi" => UnitSystem::Mi,
            other => return Err(WxError::UnknownUnitSystem(other.to_string())),
        };
        Ok(system)
    }
}

/// Convert a measurement into the requested unit system.
///
/// Only the canonical source units are converted (c, mb, mb/hr, mps,
/// degrees, mm, mm/hr, km). Any other pairing of unit and system is passed
/// through with value and unit unchanged.
pub fn convert(measurement: &Measurement, system: UnitSystem) -> Observation {
    use UnitSystem as S;

    let value = measurement.value;
    let (reading, unit) = match (&measurement.unit, system) {
        (Unit::Celsius, S::F) => (map(value, temperature::c2f), Unit::Fahrenheit),
        (Unit::Celsius, S::C) => (map(value, |c| c), Unit::Celsius),

        (Unit::Millibar, S::Inhg) => (map(value, pressure::mb2inhg), Unit::InchesHg),
        (Unit::Millibar, S::Mmhg) => (map(value, pressure::mb2mmhg), Unit::MillimetresHg),
        (Unit::Millibar, S::Hpa) => (map(value, |mb| mb), Unit::Hectopascal),
        (Unit::Millibar, S::Mb) => (map(value, |mb| mb), Unit::Millibar),
        (Unit::MillibarPerHour, S::Inhg) => {
            (map(value, pressure::mb2inhg), Unit::InchesHgPerHour)
        }
        (Unit::MillibarPerHour, S::Mmhg) => {
            (map(value, pressure::mb2mmhg), Unit::MillimetresHgPerHour)
        }
        (Unit::MillibarPerHour, S::Hpa) => (map(value, |mb| mb), Unit::HectopascalPerHour),
        (Unit::MillibarPerHour, S::Mb) => (map(value, |mb| mb), Unit::MillibarPerHour),

        (Unit::MetresPerSecond, S::Mph | S::Lfm) => {
            (map(value, speed::mps2mph), Unit::MilesPerHour)
        }
        (Unit::MetresPerSecond, S::Kts) => (map(value, speed::mps2kts), Unit::Knots),
        (Unit::MetresPerSecond, S::Kph) => (map(value, speed::mps2kph), Unit::KilometresPerHour),
        (Unit::MetresPerSecond, S::Bft) => (map(value, beaufort::scale), Unit::Beaufort),
        (Unit::MetresPerSecond, S::Mps) => (map(value, |mps| mps), Unit::MetresPerSecond),

        (Unit::Degrees, S::Degrees | S::Cardinal) => match value {
            None => (Reading::Calm, Unit::Cardinal),
            Some(deg) if deg.is_nan() => (Reading::Number(deg), Unit::Degrees),
            Some(deg) if system == S::Cardinal => (
                Reading::Text(direction::degree_to_compass(deg).to_string()),
                Unit::Cardinal,
            ),
            Some(deg) => (Reading::Number(deg), Unit::Degrees),
        },

        (Unit::Millimetres, S::In) => (map(value, precip::mm2in), Unit::Inches),
        (Unit::Millimetres, S::Cm) => (map(value, precip::mm2cm), Unit::Centimetres),
        (Unit::Millimetres, S::Mm) => (map(value, |mm| mm), Unit::Millimetres),
        (Unit::MillimetresPerHour, S::In) => (map(value, precip::mm2in), Unit::InchesPerHour),
        (Unit::MillimetresPerHour, S::Cm) => {
            (map(value, precip::mm2cm), Unit::CentimetresPerHour)
        }
        (Unit::MillimetresPerHour, S::Mm) => (map(value, |mm| mm), Unit::MillimetresPerHour),

        (Unit::Kilometres, S::Mi) => (map(value, distance::km2mi), Unit::Miles),

        (unit, _) => {
            debug!("no conversion from {unit} to {system:?}, passing through");
            (Reading::from(value), unit.clone())
        }
    };
    Observation::new(reading, unit)
}

fn map(value: Option<f64>, f: impl Fn(f64) -> f64) -> Reading {
    Reading::from(value.map(f))
}
