//! Rate acquisition abstractions.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::core::error::FetchError;

/// A single published exchange-rate observation.
///
/// `mid` is the mid-market factor converting one unit of the quoted currency
/// into the target currency. The remaining fields identify the publication
/// (currency name, rate table number and its effective date) and only matter
/// for display.
#[derive(Debug, Clone, PartialEq)]
pub struct RateQuote {
    pub currency: String,
    pub code: String,
    pub no: String,
    pub effective_date: NaiveDate,
    pub mid: f64,
}

/// Source of mid-market exchange rates.
///
/// Implementations are pure queries: a fetch must not mutate anything a
/// caller can observe, and a failed fetch must leave nothing half-updated.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Returns the current mid rate for `code`, expressed as target-currency
    /// units per one unit of `code`.
    async fn fetch_rate(&self, code: &str) -> Result<f64, FetchError>;
}
