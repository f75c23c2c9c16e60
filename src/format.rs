//! Turns converted observations into display tokens.
//!
//! Formatting is table driven: [`rule`] maps a `(Category, Unit)` pair to a
//! [`Rule`] describing precision and thresholds. Pairs with no rule are
//! passed through unformatted.

use std::fmt;

use log::debug;

use crate::config::UnitsConfig;
use crate::error::{Result, WxError};
use crate::units::{convert, Unit};
use crate::weather::{Category, Measurement, Observation, Reading};

/// Placeholder for a value that cannot be shown.
pub const NOT_AVAILABLE: &str = "-";

const PER_MINUTE: &str = " /min";

/// Rendered display tokens. The numeric token always precedes its label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayValue {
    tokens: Vec<String>,
}

impl DisplayValue {
    fn new(mut tokens: Vec<String>, trailer: &[String]) -> Self {
        tokens.extend(trailer.iter().cloned());
        Self { tokens }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<String> {
        self.tokens
    }

    /// The first token, which holds the number (or its placeholder).
    pub fn value(&self) -> &str {
        self.tokens.first().map_or("", String::as_str)
    }
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            f.write_str(token)?;
        }
        Ok(())
    }
}

/// What to show for a positive value below a grading floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Below {
    /// "Trace" with the unit label blanked.
    Trace,
    /// A fixed string such as "<0.1", keeping the unit label.
    LessThan(&'static str),
}

/// Precision graded by magnitude, used for precipitation.
#[derive(Debug, PartialEq)]
pub struct Grading {
    pub floor: f64,
    pub below: Below,
    /// `(limit, decimals)` applied to the first limit the value is under.
    /// Values above every limit get no decimals.
    pub bands: &'static [(f64, usize)],
}

/// Exact-match lookup from bucket boundary to display range.
#[derive(Debug, PartialEq)]
pub struct Buckets {
    pub bounds: &'static [f64],
    pub ranges: &'static [&'static str],
    /// Match against the value rounded to one decimal.
    pub rounded: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    Fixed { decimals: usize, width: usize },
    /// Fixed precision that never renders a negative zero.
    Unsigned { decimals: usize },
    /// One decimal below ten, none above.
    Speed,
    Graded(&'static Grading),
    /// Thousands collapse to "<n.n> k".
    Thousands,
    Bucket(&'static Buckets),
    PerMinute,
    Duration,
}

pub const MM_AMOUNT: Grading = Grading {
    floor: 0.1,
    below: Below::Trace,
    bands: &[(10.0, 1)],
};

pub const MM_RATE: Grading = Grading {
    floor: 0.1,
    below: Below::LessThan("<0.1"),
    bands: &[(10.0, 1)],
};

pub const FINE_AMOUNT: Grading = Grading {
    floor: 0.01,
    below: Below::Trace,
    bands: &[(10.0, 2), (100.0, 1)],
};

pub const FINE_RATE: Grading = Grading {
    floor: 0.01,
    below: Below::LessThan("<0.01"),
    bands: &[(10.0, 2), (100.0, 1)],
};

pub const STRIKE_KM: Buckets = Buckets {
    bounds: &[
        0.0, 5.0, 6.0, 8.0, 10.0, 12.0, 14.0, 17.0, 20.0, 24.0, 27.0, 31.0, 34.0, 37.0, 40.0,
    ],
    ranges: &[
        "0-5", "2-8", "3-9", "5-11", "7-13", "9-15", "11-17", "14-20", "17-23", "21-27", "24-30",
        "28-34", "31-37", "34-40", "37-43",
    ],
    rounded: false,
};

pub const STRIKE_MILES: Buckets = Buckets {
    bounds: &[
        0.0, 3.1, 3.7, 5.0, 6.2, 7.5, 8.7, 10.6, 12.4, 14.9, 16.8, 19.3, 21.1, 23.0, 24.9,
    ],
    ranges: &[
        "0-3", "1-5", "2-6", "3-7", "4-8", "6-9", "7-11", "9-12", "11-14", "13-17", "15-19",
        "17-21", "19-23", "21-25", "37-43",
    ],
    rounded: true,
};

/// Formatting rule for a category and unit, if one is defined.
pub fn rule(category: Category, unit: &Unit) -> Option<Rule> {
    use Category as C;

    let rule = match (category, unit) {
        (C::Temp, Unit::Celsius | Unit::Fahrenheit) => Rule::Unsigned { decimals: 1 },

        (C::Pressure, Unit::InchesHg | Unit::InchesHgPerHour) => Rule::Fixed {
            decimals: 3,
            width: 2,
        },
        (C::Pressure, Unit::MillimetresHg | Unit::MillimetresHgPerHour) => Rule::Fixed {
            decimals: 2,
            width: 3,
        },
        (
            C::Pressure,
            Unit::Hectopascal | Unit::HectopascalPerHour | Unit::Millibar | Unit::MillibarPerHour,
        ) => Rule::Fixed {
            decimals: 1,
            width: 4,
        },

        (
            C::Wind,
            Unit::MetresPerSecond
            | Unit::MilesPerHour
            | Unit::Knots
            | Unit::KilometresPerHour
            | Unit::Beaufort,
        ) => Rule::Speed,

        (C::Direction, Unit::Degrees) => Rule::Fixed {
            decimals: 0,
            width: 0,
        },

        (C::Precip, Unit::Millimetres) => Rule::Graded(&MM_AMOUNT),
        (C::Precip, Unit::MillimetresPerHour) => Rule::Graded(&MM_RATE),
        (C::Precip, Unit::Inches | Unit::Centimetres) => Rule::Graded(&FINE_AMOUNT),
        (C::Precip, Unit::InchesPerHour | Unit::CentimetresPerHour) => Rule::Graded(&FINE_RATE),

        (C::Humidity, Unit::Percent) | (C::Radiation, Unit::WattsPerSquareMetre) => Rule::Fixed {
            decimals: 0,
            width: 0,
        },
        (C::UV, Unit::UvIndex) => Rule::Fixed {
            decimals: 1,
            width: 0,
        },
        (C::Battery, Unit::Volts) => Rule::Fixed {
            decimals: 2,
            width: 0,
        },

        (C::StrikeCount, Unit::Count) => Rule::Thousands,
        (C::StrikeDistance, Unit::Kilometres) => Rule::Bucket(&STRIKE_KM),
        (C::StrikeDistance, Unit::Miles) => Rule::Bucket(&STRIKE_MILES),
        (C::StrikeFrequency, Unit::PerMinute) => Rule::PerMinute,

        (C::TimeDelta, Unit::Seconds) => Rule::Duration,

        _ => return None,
    };
    Some(rule)
}

/// Format an observation for display.
///
/// NaN and missing readings render as `"-"`; only a strike distance that
/// misses every bucket is an error.
pub fn format(observation: &Observation, category: Category) -> Result<DisplayValue> {
    let label = observation.unit.label();
    let trailer = &observation.trailer;

    let Some(rule) = rule(category, &observation.unit) else {
        debug!("no {category} rule for unit {}, passing through", observation.unit);
        return Ok(passthrough(observation));
    };

    if observation.reading.is_unavailable() {
        return Ok(DisplayValue::new(rule.unavailable(label), trailer));
    }
    let Reading::Number(value) = observation.reading else {
        return Ok(passthrough(observation));
    };

    let tokens = match rule {
        Rule::Fixed { decimals, width } => pair(fixed(value, decimals, width), label),
        Rule::Unsigned { decimals } => pair(unsigned(value, decimals), label),
        Rule::Speed => pair(fixed(value, if value < 10.0 { 1 } else { 0 }, 0), label),
        Rule::Graded(grading) => graded(value, grading, label),
        Rule::Thousands => {
            let text = if value < 1000.0 {
                fixed(value, 0, 0)
            } else {
                format!("{:.1} k", value / 1000.0)
            };
            pair(text, label)
        }
        Rule::Bucket(buckets) => pair(bucket(value, buckets, label)?.to_string(), label),
        Rule::PerMinute => pair(fixed(value, 0, 0), PER_MINUTE),
        Rule::Duration => duration(value),
    };
    Ok(DisplayValue::new(tokens, trailer))
}

/// Convert a raw measurement with the configured unit systems and format it.
pub fn render(
    measurement: &Measurement,
    category: Category,
    units: &UnitsConfig,
) -> Result<DisplayValue> {
    let observation = match units.system_for(category) {
        Some(system) => convert(measurement, system),
        None => Observation::from(measurement.clone()),
    };
    format(&observation, category)
}

impl Rule {
    fn unavailable(self, label: &str) -> Vec<String> {
        match self {
            Rule::Duration => vec![NOT_AVAILABLE.to_string(); 4],
            Rule::PerMinute => pair(NOT_AVAILABLE.to_string(), PER_MINUTE),
            _ => pair(NOT_AVAILABLE.to_string(), label),
        }
    }
}

fn passthrough(observation: &Observation) -> DisplayValue {
    DisplayValue::new(
        pair(observation.reading.to_string(), observation.unit.label()),
        &observation.trailer,
    )
}

fn pair(value: String, label: &str) -> Vec<String> {
    vec![value, label.to_string()]
}

fn fixed(value: f64, decimals: usize, width: usize) -> String {
    format!("{value:width$.decimals$}")
}

fn unsigned(value: f64, decimals: usize) -> String {
    let text = fixed(value, decimals, 0);
    if text.parse::<f64>() == Ok(0.0) {
        fixed(value.abs(), decimals, 0)
    } else {
        text
    }
}

fn graded(value: f64, grading: &Grading, label: &str) -> Vec<String> {
    if value == 0.0 {
        return pair("0".to_string(), label);
    }
    if value < grading.floor {
        return match grading.below {
            Below::Trace => pair("Trace".to_string(), ""),
            Below::LessThan(text) => pair(text.to_string(), label),
        };
    }
    let decimals = grading
        .bands
        .iter()
        .find(|(limit, _)| value < *limit)
        .map_or(0, |(_, decimals)| *decimals);
    pair(fixed(value, decimals, 0), label)
}

fn bucket(value: f64, buckets: &Buckets, label: &str) -> Result<&'static str> {
    let key = if buckets.rounded {
        (value * 10.0).round() / 10.0
    } else {
        value
    };
    buckets
        .bounds
        .iter()
        .position(|bound| *bound == key)
        .map(|index| buckets.ranges[index])
        .ok_or_else(|| WxError::StrikeDistanceBucket {
            value,
            unit: label.trim().to_string(),
        })
}

const SECONDS_PER_DAY: f64 = 86400.0;
const SECONDS_PER_HOUR: f64 = 3600.0;
const SECONDS_PER_MINUTE: f64 = 60.0;

/// Break seconds into the two most significant of days, hours and minutes.
fn duration(seconds: f64) -> Vec<String> {
    let days = seconds.div_euclid(SECONDS_PER_DAY);
    let remainder = seconds.rem_euclid(SECONDS_PER_DAY);
    let hours = remainder.div_euclid(SECONDS_PER_HOUR);
    let remainder = remainder.rem_euclid(SECONDS_PER_HOUR);
    let minutes = remainder.div_euclid(SECONDS_PER_MINUTE);

    let blank = || NOT_AVAILABLE.to_string();
    if days >= 100.0 {
        vec![whole(days), "days".to_string(), blank(), blank()]
    } else if days >= 1.0 {
        vec![
            whole(days),
            plural(days, "day", "days"),
            whole(hours),
            plural(hours, "hour", "hours"),
        ]
    } else if hours >= 1.0 {
        vec![
            whole(hours),
            plural(hours, "hour", "hours"),
            whole(minutes),
            plural(minutes, "min", "mins"),
        ]
    } else if minutes == 0.0 {
        vec!["< 1".to_string(), "minute".to_string(), blank(), blank()]
    } else {
        vec![
            whole(minutes),
            plural(minutes, "minute", "minutes"),
            blank(),
            blank(),
        ]
    }
}

fn whole(value: f64) -> String {
    fixed(value, 0, 0)
}

fn plural(count: f64, one: &str, many: &str) -> String {
    let word = if count == 1.0 { one } else { many };
    word.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::UnitSystem;

    fn show(value: f64, tag: &str, category: Category) -> Vec<String> {
        let observation = Observation::new(Reading::Number(value), Unit::from_tag(tag));
        format(&observation, category).unwrap().into_tokens()
    }

    fn first(value: f64, tag: &str, category: Category) -> String {
        show(value, tag, category).remove(0)
    }

    #[test]
    fn every_declared_unit_has_a_rule() {
        for category in Category::ALL {
            for unit in category.units() {
                assert!(
                    rule(category, unit).is_some(),
                    "{category} has no rule for {unit}"
                );
            }
        }
    }

    #[test]
    fn temperature_never_shows_negative_zero() {
        assert_eq!(show(32.0, "f", Category::Temp), ["32.0", " [sup]o[/sup]F"]);
        assert_eq!(first(-0.04, "f", Category::Temp), "0.0");
        assert_eq!(first(-0.0, "c", Category::Temp), "0.0");
        assert_eq!(first(-3.27, "c", Category::Temp), "-3.3");
    }

    #[test]
    fn pressure_precision_per_unit() {
        assert_eq!(first(29.9213, "inhg", Category::Pressure), "29.921");
        assert_eq!(first(760.0, "mmhg", Category::Pressure), "760.00");
        assert_eq!(first(1013.27, "hpa", Category::Pressure), "1013.3");
        assert_eq!(first(1.2, "mb/hr", Category::Pressure), " 1.2");
        assert_eq!(show(-0.02, "inhg/hr", Category::Pressure), ["-0.020", " inHg/hr"]);
    }

    #[test]
    fn wind_switches_precision_at_ten() {
        assert_eq!(first(9.44, "mph", Category::Wind), "9.4");
        assert_eq!(first(12.6, "kph", Category::Wind), "13");
        assert_eq!(first(3.0, "bft", Category::Wind), "3.0");
    }

    #[test]
    fn direction_rounds_degrees_and_passes_labels() {
        assert_eq!(show(224.6, "degrees", Category::Direction), ["225", "[sup]o[/sup]"]);
        let calm = Observation::new(Reading::Calm, Unit::Cardinal);
        assert_eq!(
            format(&calm, Category::Direction).unwrap().tokens(),
            ["Calm", ""]
        );
        let text = Observation::new(Reading::Text("NNE".to_string()), Unit::Cardinal);
        assert_eq!(format(&text, Category::Direction).unwrap().value(), "NNE");
    }

    #[test]
    fn millimetre_precip_thresholds() {
        assert_eq!(show(0.05, "mm", Category::Precip), ["Trace", ""]);
        assert_eq!(show(0.05, "mm/hr", Category::Precip), ["<0.1", " mm/hr"]);
        assert_eq!(first(0.0, "mm", Category::Precip), "0");
        assert_eq!(first(2.34, "mm", Category::Precip), "2.3");
        assert_eq!(first(12.7, "mm/hr", Category::Precip), "13");
    }

    #[test]
    fn fine_precip_thresholds() {
        assert_eq!(show(0.005, "in", Category::Precip), ["Trace", ""]);
        assert_eq!(show(0.005, "cm/hr", Category::Precip), ["<0.01", " cm/hr"]);
        assert_eq!(first(1.234, "in", Category::Precip), "1.23");
        assert_eq!(first(12.34, "cm", Category::Precip), "12.3");
        assert_eq!(first(123.4, "in/hr", Category::Precip), "123");
    }

    #[test]
    fn simple_fixed_categories() {
        assert_eq!(first(56.4, "%", Category::Humidity), "56");
        assert_eq!(first(812.7, "w/m2", Category::Radiation), "813");
        assert_eq!(first(3.14, "index", Category::UV), "3.1");
        assert_eq!(first(2.6481, "v", Category::Battery), "2.65");
    }

    #[test]
    fn strike_count_collapses_thousands() {
        assert_eq!(first(999.0, "count", Category::StrikeCount), "999");
        assert_eq!(first(1520.0, "count", Category::StrikeCount), "1.5 k");
    }

    #[test]
    fn strike_distance_buckets() {
        assert_eq!(first(0.0, "km", Category::StrikeDistance), "0-5");
        assert_eq!(first(17.0, "km", Category::StrikeDistance), "14-20");
        assert_eq!(first(40.0, "km", Category::StrikeDistance), "37-43");

        let miles = convert(
            &Measurement::parse(Some(5.0), "km"),
            UnitSystem::Mi,
        );
        let display = format(&miles, Category::StrikeDistance).unwrap();
        assert_eq!(display.tokens(), ["1-5", "miles"]);
    }

    #[test]
    fn threshold_edges() {
        assert_eq!(first(10.0, "mph", Category::Wind), "10");
        assert_eq!(first(9.99, "mph", Category::Wind), "10.0");
        assert_eq!(first(10.0, "mm", Category::Precip), "10");
        assert_eq!(show(0.1, "mm", Category::Precip), ["0.1", " mm"]);
        assert_eq!(first(0.1, "mm/hr", Category::Precip), "0.1");
        assert_eq!(first(100.0, "in", Category::Precip), "100");
        assert_eq!(first(10.0, "in", Category::Precip), "10.0");
        assert_eq!(first(0.01, "in/hr", Category::Precip), "0.01");
        assert_eq!(first(1000.0, "count", Category::StrikeCount), "1.0 k");
        assert_eq!(first(999.4, "count", Category::StrikeCount), "999");
    }

    #[test]
    fn strike_distance_miss_is_an_error() {
        let observation = Observation::new(Reading::Number(7.0), Unit::Kilometres);
        let err = format(&observation, Category::StrikeDistance).unwrap_err();
        assert!(matches!(err, WxError::StrikeDistanceBucket { value, .. } if value == 7.0));
    }

    #[test]
    fn strike_frequency_keeps_suffix() {
        assert_eq!(show(4.4, "/min", Category::StrikeFrequency), ["4", " /min"]);
        assert_eq!(
            show(f64::NAN, "/min", Category::StrikeFrequency),
            ["-", " /min"]
        );
    }

    #[test]
    fn not_a_number_is_a_dash() {
        for category in Category::ALL {
            for unit in category.units() {
                let observation = Observation::new(Reading::Number(f64::NAN), unit.clone());
                let display = format(&observation, category).unwrap();
                assert_eq!(display.value(), "-");
            }
        }
        let missing = Observation::new(Reading::Missing, Unit::Celsius);
        assert_eq!(format(&missing, Category::Temp).unwrap().value(), "-");
    }

    fn delta(seconds: f64) -> Vec<String> {
        let observation =
            Observation::new(Reading::Number(seconds), Unit::Seconds).with_trailer("ago");
        format(&observation, Category::TimeDelta)
            .unwrap()
            .into_tokens()
    }

    #[test]
    fn time_delta_breakdown() {
        assert_eq!(delta(90061.0), ["1", "day", "1", "hour", "ago"]);
        assert_eq!(delta(2.0 * 86400.0 + 5.0 * 3600.0), ["2", "days", "5", "hours", "ago"]);
        assert_eq!(delta(86400.0), ["1", "day", "0", "hours", "ago"]);
        assert_eq!(delta(150.0 * 86400.0), ["150", "days", "-", "-", "ago"]);
        assert_eq!(delta(3660.0), ["1", "hour", "1", "min", "ago"]);
        assert_eq!(delta(7500.0), ["2", "hours", "5", "mins", "ago"]);
        assert_eq!(delta(0.0), ["< 1", "minute", "-", "-", "ago"]);
        assert_eq!(delta(59.0), ["< 1", "minute", "-", "-", "ago"]);
        assert_eq!(delta(60.0), ["1", "minute", "-", "-", "ago"]);
        assert_eq!(delta(600.0), ["10", "minutes", "-", "-", "ago"]);
    }

    #[test]
    fn time_delta_not_a_number_collapses() {
        assert_eq!(delta(f64::NAN), ["-", "-", "-", "-", "ago"]);
    }

    #[test]
    fn unknown_unit_passes_through() {
        let observation = Observation::new(Reading::Number(1.5), Unit::from_tag("furlongs"));
        let display = format(&observation, Category::Temp).unwrap();
        assert_eq!(display.tokens(), ["1.5", "furlongs"]);
    }

    #[test]
    fn render_converts_then_formats() {
        let units = UnitsConfig {
            temp: UnitSystem::F,
            ..UnitsConfig::default()
        };
        let display = render(&Measurement::parse(Some(0.0), "c"), Category::Temp, &units).unwrap();
        assert_eq!(display.to_string(), "32.0 [sup]o[/sup]F");

        let pressure = render(
            &Measurement::parse(Some(1013.25), "mb"),
            Category::Pressure,
            &UnitsConfig {
                pressure: UnitSystem::Inhg,
                ..UnitsConfig::default()
            },
        )
        .unwrap();
        assert_eq!(pressure.value(), "29.921");
    }

    #[test]
    fn formatting_is_repeatable() {
        let observation = Observation::new(Reading::Number(0.05), Unit::Millimetres);
        assert_eq!(
            format(&observation, Category::Precip).unwrap(),
            format(&observation, Category::Precip).unwrap()
        );
    }
}
