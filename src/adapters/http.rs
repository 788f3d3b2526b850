use crate::core::{ConfigProvider, MassageGateway, QuoteResponse};
use crate::utils::error::{QuoteError, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use std::time::Duration;
use url::Url;

pub struct HttpMassageGateway {
    base_url: Url,
    client: Client,
}

impl HttpMassageGateway {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()?;

        Ok(Self {
            base_url: base_url(config.gateway_endpoint())?,
            client,
        })
    }

    /// `{endpoint}quote/{yyyy-MM-dd}`
    pub fn quote_url(&self, date: NaiveDate) -> Result<Url> {
        let path = format!("quote/{}", date.format("%Y-%m-%d"));
        Ok(self.base_url.join(&path)?)
    }
}

fn base_url(endpoint: &str) -> Result<Url> {
    // join() 會取代最後一段路徑，所以補上結尾斜線
    if endpoint.ends_with('/') {
        Ok(Url::parse(endpoint)?)
    } else {
        Ok(Url::parse(&format!("{}/", endpoint))?)
    }
}

#[async_trait]
impl MassageGateway for HttpMassageGateway {
    async fn get_massages(&self, date: NaiveDate) -> Result<QuoteResponse> {
        let url = self.quote_url(date)?;

        tracing::debug!("Making API request to: {}", url);
        let response = self.client.get(url.clone()).send().await?;
        tracing::debug!("API response status: {}", response.status());

        if !response.status().is_success() {
            return Err(QuoteError::GatewayStatus {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let quote: QuoteResponse = serde_json::from_str(&body)?;
        tracing::debug!("Received {} massages", quote.massages.len());
        Ok(quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    struct TestConfig {
        endpoint: String,
        statuses: Vec<String>,
    }

    impl ConfigProvider for TestConfig {
        fn gateway_endpoint(&self) -> &str {
            &self.endpoint
        }

        fn timeout_seconds(&self) -> u64 {
            5
        }

        fn accepted_statuses(&self) -> &[String] {
            &self.statuses
        }
    }

    fn gateway(endpoint: String) -> HttpMassageGateway {
        HttpMassageGateway::new(&TestConfig {
            endpoint,
            statuses: vec![],
        })
        .unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 7, 4).unwrap()
    }

    #[test]
    fn test_quote_url_with_and_without_trailing_slash() {
        let with_slash = gateway("http://localhost:38080/massages/".to_string());
        let without_slash = gateway("http://localhost:38080/massages".to_string());

        assert_eq!(
            with_slash.quote_url(date()).unwrap().as_str(),
            "http://localhost:38080/massages/quote/2030-07-04"
        );
        assert_eq!(
            without_slash.quote_url(date()).unwrap().as_str(),
            "http://localhost:38080/massages/quote/2030-07-04"
        );
    }

    #[test]
    fn test_invalid_endpoint_is_rejected() {
        let result = HttpMassageGateway::new(&TestConfig {
            endpoint: "not a url".to_string(),
            statuses: vec![],
        });

        assert!(matches!(result, Err(QuoteError::UrlError(_))));
    }

    #[tokio::test]
    async fn test_get_massages_parses_response() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/massages/quote/2030-07-04");
                then.status(200)
                    .header("Content-Type", "application/json")
                    .json_body(serde_json::json!({
                        "massages": [{
                            "code": "7",
                            "name": "Hot stones",
                            "status": "AVAILABLE",
                            "price": {"amount": 60.0, "currency": "EUR"},
                            "cancellationPolicies": [],
                            "duration": 50
                        }]
                    }));
            })
            .await;

        let response = gateway(server.url("/massages/"))
            .get_massages(date())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.massages.len(), 1);
        assert_eq!(response.massages[0].code, "7");
        assert_eq!(response.massages[0].duration, 50);
    }

    #[tokio::test]
    async fn test_get_massages_reports_http_status() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/massages/quote/2030-07-04");
                then.status(500);
            })
            .await;

        let result = gateway(server.url("/massages")).get_massages(date()).await;

        mock.assert_async().await;
        assert!(matches!(
            result,
            Err(QuoteError::GatewayStatus { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_get_massages_rejects_malformed_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/massages/quote/2030-07-04");
                then.status(200).body("<html>maintenance</html>");
            })
            .await;

        let result = gateway(server.url("/massages/")).get_massages(date()).await;

        assert!(matches!(result, Err(QuoteError::SerializationError(_))));
    }
}
