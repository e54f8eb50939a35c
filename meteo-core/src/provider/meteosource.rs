use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use super::{ForecastProvider, Location, truncate_body};

const RAPIDAPI_HOST: &str = "ai-weather-by-meteosource.p.rapidapi.com";

/// Daily forecast from Meteosource, reached through RapidAPI.
#[derive(Debug, Clone)]
pub struct MeteosourceProvider {
    api_key: String,
    base_url: String,
    location: Location,
    http: Client,
}

impl MeteosourceProvider {
    pub fn with_base_url(api_key: String, base_url: &str, location: Location) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            location,
            http,
        })
    }
}

#[async_trait]
impl ForecastProvider for MeteosourceProvider {
    async fn daily_forecast(&self) -> Result<Value> {
        let url = format!("{}/daily", self.base_url);

        tracing::info!(
            lat = self.location.lat,
            lon = self.location.lon,
            "fetching daily forecast"
        );

        let res = self
            .http
            .get(&url)
            .query(&[
                ("lat", self.location.lat.to_string().as_str()),
                ("lon", self.location.lon.to_string().as_str()),
                ("language", "fr"),
                ("units", "auto"),
            ])
            .header("x-rapidapi-host", RAPIDAPI_HOST)
            .header("x-rapidapi-key", self.api_key.as_str())
            .send()
            .await
            .context("Failed to send request to Meteosource (daily forecast)")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read Meteosource daily response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Meteosource daily request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        serde_json::from_str(&body)
            .context("Failed to parse Meteosource daily JSON")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::XERTIGNY;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(api_key: &str, base_url: &str) -> MeteosourceProvider {
        MeteosourceProvider::with_base_url(api_key.into(), base_url, XERTIGNY).unwrap()
    }

    #[tokio::test]
    async fn sends_fixed_query_and_rapidapi_headers() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/daily"))
            .and(query_param("lat", "48.2719"))
            .and(query_param("lon", "6.4822"))
            .and(query_param("language", "fr"))
            .and(query_param("units", "auto"))
            .and(header("x-rapidapi-host", RAPIDAPI_HOST))
            .and(header("x-rapidapi-key", "test_key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "daily": {"data": [{"day": "2025-03-01"}]}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = provider_for("test_key", &mock_server.uri());
        let doc = provider.daily_forecast().await.unwrap();

        assert_eq!(doc["daily"]["data"][0]["day"], "2025-03-01");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/daily"))
            .respond_with(ResponseTemplate::new(403).set_body_string("Invalid API key"))
            .mount(&mock_server)
            .await;

        let provider = provider_for("bad", &mock_server.uri());
        let err = provider.daily_forecast().await.unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("403"));
        assert!(msg.contains("Invalid API key"));
    }

    #[tokio::test]
    async fn malformed_body_is_an_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/daily"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("<html>not json</html>"),
            )
            .mount(&mock_server)
            .await;

        let provider = provider_for("k", &mock_server.uri());
        let err = provider.daily_forecast().await.unwrap_err();

        assert!(err.to_string().contains("Failed to parse Meteosource daily JSON"));
    }

    #[tokio::test]
    async fn trailing_slash_in_base_url_is_ignored() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/daily"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let base = format!("{}/", mock_server.uri());
        let provider = provider_for("k", &base);

        assert!(provider.daily_forecast().await.is_ok());
    }
}
