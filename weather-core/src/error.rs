use std::fmt;

/// Which of the two outbound calls failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Geocoding,
    Forecast,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Geocoding => "geocoding",
            Stage::Forecast => "forecast",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures of an outbound provider call. None of these are retried.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to send {stage} request: {source}")]
    Request {
        stage: Stage,
        #[source]
        source: reqwest::Error,
    },

    #[error("{stage} request failed with status {status}: {body}")]
    Status {
        stage: Stage,
        status: u16,
        body: String,
    },

    #[error("Failed to parse {stage} JSON: {source}")]
    Decode {
        stage: Stage,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub fn stage(&self) -> Stage {
        match self {
            Error::Request { stage, .. }
            | Error::Status { stage, .. }
            | Error::Decode { stage, .. } => *stage,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
