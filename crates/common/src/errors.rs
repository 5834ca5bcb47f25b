use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Malformed observation: field `{field}`: {reason}")]
    MalformedObservation { field: &'static str, reason: String },
    #[error("Invalid quality label: {0:?}")]
    InvalidQualityLabel(String),
    #[error("Invalid quality threshold: {0:?} (expected one of poor, questionable, good, excellent)")]
    InvalidQualityThreshold(String),
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
    #[error("Invalid config value for {key}: {reason}")]
    InvalidConfig { key: String, reason: String },
}

impl Error {
    pub fn malformed(field: &'static str, reason: impl Into<String>) -> Self {
        Error::MalformedObservation {
            field,
            reason: reason.into(),
        }
    }
}
