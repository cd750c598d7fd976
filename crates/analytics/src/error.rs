use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("Invalid rolling window length {0}: must be at least one day")]
    InvalidWindow(usize),

    #[error("Invalid date range: {0}")]
    InvalidRange(String),

    #[error("Invalid reporting timezone offset of {0} minutes")]
    InvalidTimezone(i32),
}

impl From<core_types::CoreError> for AnalyticsError {
    fn from(err: core_types::CoreError) -> Self {
        AnalyticsError::InvalidRange(err.to_string())
    }
}
