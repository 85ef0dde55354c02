use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::core::error::FetchError;
use crate::core::rates::{RateProvider, RateQuote};

/// Client for the NBP (Narodowy Bank Polski) Web API.
///
/// Rates come from table A of average exchange rates; the `mid` value of the
/// first rate record in the response is the conversion factor to PLN.
pub struct NbpProvider {
    base_url: String,
    timeout: Option<Duration>,
}

impl NbpProvider {
    /// `timeout` is the per-request deadline; `None` leaves the request
    /// unbounded.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Self {
        NbpProvider {
            base_url: base_url.to_string(),
            timeout,
        }
    }

    fn client(&self) -> Result<reqwest::Client, reqwest::Error> {
        let mut builder = reqwest::Client::builder().user_agent("kantor/0.1");
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }

    /// Fetches the full published record for `code`: mid rate, effective
    /// date, table number and currency name.
    pub async fn fetch_quote(&self, code: &str) -> Result<RateQuote, FetchError> {
        let url = format!(
            "{}/api/exchangerates/rates/a/{}/?format=json",
            self.base_url, code
        );
        debug!("Requesting exchange rate from {}", url);

        let response = self.client()?.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status(),
                url,
            });
        }

        let text = response.text().await?;

        let table: NbpRatesResponse =
            serde_json::from_str(&text).map_err(|e| FetchError::Decode {
                code: code.to_string(),
                source: e,
            })?;

        let rate = table
            .rates
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::EmptyRates {
                code: code.to_string(),
            })?;

        debug!(
            "Fetched rate for {}: {} (effective {})",
            table.code, rate.mid, rate.effective_date
        );

        Ok(RateQuote {
            currency: table.currency,
            code: table.code,
            no: rate.no,
            effective_date: rate.effective_date,
            mid: rate.mid,
        })
    }
}

#[derive(Debug, Deserialize)]
struct NbpRatesResponse {
    currency: String,
    code: String,
    rates: Vec<NbpRate>,
}

#[derive(Debug, Deserialize)]
struct NbpRate {
    no: String,
    #[serde(alias = "effectiveDate")]
    effective_date: NaiveDate,
    mid: f64,
}

#[async_trait]
impl RateProvider for NbpProvider {
    async fn fetch_rate(&self, code: &str) -> Result<f64, FetchError> {
        Ok(self.fetch_quote(code).await?.mid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn create_mock_server(code: &str, mock_response: &str, status_code: u16) -> MockServer {
        let mock_server = MockServer::start().await;
        let request_path = format!("/api/exchangerates/rates/a/{code}/");

        Mock::given(method("GET"))
            .and(path(&request_path))
            .respond_with(ResponseTemplate::new(status_code).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        mock_server
    }

    #[tokio::test]
    async fn test_successful_quote_fetch() {
        let mock_response = r#"{
            "table": "A",
            "currency": "funt szterling",
            "code": "GBP",
            "rates": [{
                "no": "160/A/NBP/2025",
                "effectiveDate": "2025-08-19",
                "mid": 4.9059
            }]
        }"#;

        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/exchangerates/rates/a/GBP/"))
            .and(query_param("format", "json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        let provider = NbpProvider::new(&mock_server.uri(), None);
        let quote = provider.fetch_quote("GBP").await.unwrap();

        assert_eq!(quote.mid, 4.9059);
        assert_eq!(quote.code, "GBP");
        assert_eq!(quote.currency, "funt szterling");
        assert_eq!(quote.no, "160/A/NBP/2025");
        assert_eq!(
            quote.effective_date,
            NaiveDate::from_ymd_opt(2025, 8, 19).unwrap()
        );
    }

    #[tokio::test]
    async fn test_fetch_rate_returns_first_mid() {
        // Older rate records after the first must be ignored
        let mock_response = r#"{
            "table": "A",
            "currency": "dolar amerykański",
            "code": "USD",
            "rates": [
                {"no": "160/A/NBP/2025", "effectiveDate": "2025-08-19", "mid": 3.6481},
                {"no": "159/A/NBP/2025", "effectiveDate": "2025-08-18", "mid": 3.6512}
            ]
        }"#;

        let mock_server = create_mock_server("USD", mock_response, 200).await;

        let provider = NbpProvider::new(&mock_server.uri(), None);
        let rate = provider.fetch_rate("USD").await.unwrap();

        assert_eq!(rate, 3.6481);
    }

    #[tokio::test]
    async fn test_unknown_currency_status_error() {
        // NBP answers 404 with a plain-text body for unknown codes
        let mock_server =
            create_mock_server("XXX", "404 NotFound - Not Found - Brak danych", 404).await;

        let provider = NbpProvider::new(&mock_server.uri(), None);
        let result = provider.fetch_quote("XXX").await;

        match result {
            Err(FetchError::Status { status, .. }) => assert_eq!(status.as_u16(), 404),
            other => panic!("Expected a status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_rates_error() {
        let mock_response = r#"{
            "table": "A",
            "currency": "funt szterling",
            "code": "GBP",
            "rates": []
        }"#;

        let mock_server = create_mock_server("GBP", mock_response, 200).await;

        let provider = NbpProvider::new(&mock_server.uri(), None);
        let result = provider.fetch_quote("GBP").await;

        assert!(matches!(result, Err(FetchError::EmptyRates { .. })));
        assert_eq!(
            result.unwrap_err().to_string(),
            "rate source returned no rates for 'GBP'"
        );
    }

    #[tokio::test]
    async fn test_malformed_response_decode_error() {
        let mock_response = r#"{ "table": "A", "ratez": [] }"#;

        let mock_server = create_mock_server("GBP", mock_response, 200).await;

        let provider = NbpProvider::new(&mock_server.uri(), None);
        let result = provider.fetch_quote("GBP").await;

        assert!(matches!(result, Err(FetchError::Decode { .. })));
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("could not decode rate response for 'GBP'")
        );
    }

    #[tokio::test]
    async fn test_non_numeric_mid_decode_error() {
        let mock_response = r#"{
            "table": "A",
            "currency": "funt szterling",
            "code": "GBP",
            "rates": [{"no": "160/A/NBP/2025", "effectiveDate": "2025-08-19", "mid": "4.9059zł"}]
        }"#;

        let mock_server = create_mock_server("GBP", mock_response, 200).await;

        let provider = NbpProvider::new(&mock_server.uri(), None);
        let result = provider.fetch_quote("GBP").await;

        assert!(matches!(result, Err(FetchError::Decode { .. })));
    }

    #[tokio::test]
    async fn test_request_deadline_expires() {
        let mock_response = r#"{
            "table": "A",
            "currency": "funt szterling",
            "code": "GBP",
            "rates": [{"no": "160/A/NBP/2025", "effectiveDate": "2025-08-19", "mid": 4.9059}]
        }"#;

        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/exchangerates/rates/a/GBP/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(mock_response)
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&mock_server)
            .await;

        let provider = NbpProvider::new(&mock_server.uri(), Some(Duration::from_millis(50)));
        let result = provider.fetch_quote("GBP").await;

        assert!(matches!(result, Err(FetchError::Request(_))));
    }
}
