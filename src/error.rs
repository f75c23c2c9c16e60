use thiserror::Error;

/// Errors raised when a lookup table or forecast series breaks its data
/// contract. Placeholder outcomes ("-", "--", "ForecastUnavailable") are
/// ordinary values and never show up here.
#[derive(Debug, Error)]
pub enum WxError {
    /// Strike distance did not match any known bucket boundary
    #[error("strike distance {value} {unit} is not a known bucket boundary")]
    StrikeDistanceBucket { value: f64, unit: String },

    /// Selected forecast index fell outside the series
    #[error("forecast index {index} is out of range for {len} hourly periods")]
    ForecastIndex { index: usize, len: usize },

    /// Forecast period start could not be represented as a date
    #[error("invalid forecast period start: {0}")]
    InvalidTimestamp(i64),

    /// Forecast response carried no hourly series
    #[error("forecast response has no hourly periods")]
    MissingForecast,

    #[error("unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error("unknown unit system: {0}")]
    UnknownUnitSystem(String),

    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = WxError> = std::result::Result<T, E>;
