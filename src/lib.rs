//! Conversion and display formatting of weather station observations and
//! hourly forecasts.

pub mod config;
pub mod error;
pub mod forecast;
pub mod format;
pub mod units;
pub mod weather;

pub use config::{Config, StationConfig, UnitsConfig};
pub use error::{Result, WxError};
pub use forecast::{extract, icon_for, select_current, ForecastCache, ForecastPanel, Hourly, Icon};
pub use format::{format, render, DisplayValue};
pub use units::{convert, Unit, UnitSystem};
pub use weather::{Category, Measurement, Observation, Reading};
