//! The conversion engine: one exchange rate, validated bidirectional math.

use std::sync::Arc;

use crate::core::error::CalculatorError;
use crate::core::rates::RateProvider;

/// Converts amounts in both directions between two currencies using a single
/// mid-market exchange rate.
///
/// A fresh calculator holds no rate. Callers are expected to run [`init`]
/// (or [`set_exchange_rate`]) before converting; converting without a rate is
/// a documented precondition violation and yields `NaN` rather than an error.
/// The stored rate survives failed operations unchanged: a rejected argument
/// or a failed fetch never leaves the calculator half-updated.
///
/// [`init`]: Calculator::init
/// [`set_exchange_rate`]: Calculator::set_exchange_rate
pub struct Calculator {
    provider: Arc<dyn RateProvider>,
    exchange_rate: Option<f64>,
}

impl Calculator {
    /// Creates a calculator with no exchange rate set. Performs no I/O.
    pub fn new(provider: Arc<dyn RateProvider>) -> Self {
        Calculator {
            provider,
            exchange_rate: None,
        }
    }

    /// Fetches the rate for `currency_code` from the rate source and stores
    /// it as the conversion factor.
    ///
    /// On failure the stored rate keeps its previous value, whether that was
    /// unset or the result of an earlier successful call.
    pub async fn init(&mut self, currency_code: &str) -> Result<(), CalculatorError> {
        let rate = self.provider.fetch_rate(currency_code).await?;
        self.exchange_rate = Some(rate);
        Ok(())
    }

    /// Converts an amount of the source currency into the target currency.
    ///
    /// Negative amounts are rejected with
    /// [`CalculatorError::InvalidArgument`].
    pub fn calculate_from(&self, amount_from: f64) -> Result<f64, CalculatorError> {
        if amount_from < 0.0 {
            return Err(CalculatorError::InvalidArgument(format!(
                "cannot convert negative amount {amount_from}"
            )));
        }
        Ok(amount_from * self.rate_or_nan())
    }

    /// Converts an amount of the target currency back into the source
    /// currency, the inverse of [`calculate_from`](Calculator::calculate_from).
    ///
    /// Negative amounts are rejected. A stored rate of exactly zero makes the
    /// inverse infinite; guarding against a zero rate is the caller's
    /// responsibility.
    pub fn calculate_to(&self, amount_to: f64) -> Result<f64, CalculatorError> {
        if amount_to < 0.0 {
            return Err(CalculatorError::InvalidArgument(format!(
                "cannot convert negative amount {amount_to}"
            )));
        }
        Ok(amount_to * (1.0 / self.rate_or_nan()))
    }

    /// Asks the rate source for the current mid rate of `currency_code`
    /// without touching the stored rate.
    pub async fn fetch_exchange_rate(&self, currency_code: &str) -> Result<f64, CalculatorError> {
        Ok(self.provider.fetch_rate(currency_code).await?)
    }

    /// Overwrites the stored rate directly, bypassing the rate source.
    ///
    /// Only `NaN` is rejected. Zero and negative rates are accepted and
    /// produce degenerate conversions (infinities, sign flips); rejecting
    /// them is deliberately left to callers.
    pub fn set_exchange_rate(&mut self, rate: f64) -> Result<(), CalculatorError> {
        if rate.is_nan() {
            return Err(CalculatorError::InvalidArgument(
                "exchange rate is NaN".to_string(),
            ));
        }
        self.exchange_rate = Some(rate);
        Ok(())
    }

    /// The currently stored rate, `None` until a fetch or an assignment
    /// succeeds.
    pub fn exchange_rate(&self) -> Option<f64> {
        self.exchange_rate
    }

    fn rate_or_nan(&self) -> f64 {
        self.exchange_rate.unwrap_or(f64::NAN)
    }
}
