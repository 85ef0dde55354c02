//! Typed errors for the calculator core and the rate-fetch path.

use thiserror::Error;

/// A failure while acquiring a rate from the external source.
///
/// Transport failures, non-2xx statuses, undecodable bodies and empty rate
/// tables each map onto their own variant so callers can match on the kind.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("rate request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("rate source answered {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("could not decode rate response for '{code}': {source}")]
    Decode {
        code: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate source returned no rates for '{code}'")]
    EmptyRates { code: String },
}

/// Errors surfaced by [`Calculator`](crate::core::calculator::Calculator)
/// operations.
#[derive(Debug, Error)]
pub enum CalculatorError {
    /// Synchronous rejection of a bad argument. The calculator state is
    /// untouched by the failed call.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The external rate source could not deliver a usable rate.
    #[error("failed to fetch exchange rate: {0}")]
    Fetch(#[from] FetchError),
}
