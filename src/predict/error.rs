use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider request failed with status {status}")]
    Status { status: u16 },
    #[error("provider request failed: {0}")]
    Transport(String),
    #[error("no passes data found: {0}")]
    Data(String),
}

impl ProviderError {
    /// Transport failures abort the satellite, data failures mean zero passes.
    pub fn is_transport(&self) -> bool {
        matches!(self, ProviderError::Status { .. } | ProviderError::Transport(_))
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => ProviderError::Status {
                status: status.as_u16(),
            },
            None => ProviderError::Transport(err.to_string()),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum MalformedPassError {
    #[error("pass entry is not an object")]
    NotAnObject,
    #[error("pass entry is missing {0}")]
    MissingField(&'static str),
    #[error("invalid pass entry: {0}")]
    Invalid(String),
    #[error("timestamp out of range in {field}: {value}")]
    TimestampOutOfRange { field: &'static str, value: i64 },
    #[error("pass times out of order (start {start}, peak {peak}, end {end})")]
    OutOfOrder { start: i64, peak: i64, end: i64 },
}
