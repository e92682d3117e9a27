use async_trait::async_trait;
use std::time::Duration;

use crate::domain::DomainError;

/// Trait for HTTP client operations (for mocking)
#[async_trait]
pub trait HttpClientTrait: Send + Sync + std::fmt::Debug {
    async fn get_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
    ) -> Result<serde_json::Value, DomainError>;

    async fn post_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, DomainError>;
}

/// Real HTTP client using reqwest
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    provider: &'static str,
}

impl HttpClient {
    pub fn new(provider: &'static str) -> Self {
        Self {
            client: reqwest::Client::new(),
            provider,
        }
    }

    pub fn with_options(
        provider: &'static str,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                DomainError::configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self { client, provider })
    }

    async fn read_json(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<serde_json::Value, DomainError> {
        let response = request.send().await.map_err(|e| {
            DomainError::upstream(self.provider, format!("Request failed: {}", e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            return Err(DomainError::upstream(
                self.provider,
                format!("HTTP {}: {}", status, error_body),
            ));
        }

        response.json().await.map_err(|e| {
            DomainError::upstream(self.provider, format!("Failed to parse response: {}", e))
        })
    }
}

#[async_trait]
impl HttpClientTrait for HttpClient {
    async fn get_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
    ) -> Result<serde_json::Value, DomainError> {
        let mut request = self.client.get(url);

        for (key, value) in headers {
            request = request.header(key, value);
        }

        self.read_json(request).await
    }

    async fn post_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, DomainError> {
        let mut request = self.client.post(url);

        for (key, value) in headers {
            request = request.header(key, value);
        }

        self.read_json(request.json(body)).await
    }
}
