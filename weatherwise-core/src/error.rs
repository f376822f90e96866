use thiserror::Error;

/// Failures at the fetcher boundary.
///
/// None of these reach the user as an alert; the session logs them and keeps
/// whatever forecast it was already showing.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("Failed to send forecast request")]
    Request(#[source] reqwest::Error),

    #[error("Forecast request failed with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Forecast response did not match the expected schema: {0}")]
    Parse(String),
}

#[derive(Debug, Error)]
#[error("Unknown city '{0}'. Supported cities: İstanbul, Ankara, İzmir, Antalya.")]
pub struct LocationParseError(pub String);
