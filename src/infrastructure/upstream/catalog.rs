//! Video catalog adapter over a JSON catalog service

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::domain::anime::{AnimeRecord, AnimeSummary, DownloadLinks, StreamData};
use crate::domain::upstream::VideoCatalogSource;
use crate::domain::DomainError;

use super::http_client::HttpClientTrait;

const PROVIDER: &str = "catalog";

/// Catalog client. Path parameters are appended as received so that
/// percent-encoded ids and queries reach the catalog unchanged; the search
/// page arrives decoded and is encoded again as a single query value.
#[derive(Debug)]
pub struct HttpCatalogSource {
    client: Arc<dyn HttpClientTrait>,
    base_url: String,
}

impl HttpCatalogSource {
    pub fn new(client: Arc<dyn HttpClientTrait>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get(&self, path: &str, headers: Vec<(&str, &str)>) -> Result<Value, DomainError> {
        let url = self.url(path);
        debug!(url = %url, "Calling catalog");
        let value = self.client.get_json(&url, headers).await?;
        Ok(unwrap_results(value))
    }

    async fn get_as<T: DeserializeOwned>(&self, path: &str) -> Result<T, DomainError> {
        let value = self.get(path, vec![]).await?;
        serde_json::from_value(value).map_err(|e| {
            DomainError::upstream(PROVIDER, format!("Unexpected payload for {}: {}", path, e))
        })
    }
}

/// The catalog wraps some payloads in `{"results": ...}`
fn unwrap_results(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.len() == 1 && map.contains_key("results") => {
            map.remove("results").unwrap_or(Value::Null)
        }
        other => other,
    }
}

#[async_trait]
impl VideoCatalogSource for HttpCatalogSource {
    async fn fetch_entity(&self, id: &str) -> Result<AnimeRecord, DomainError> {
        self.get_as(&format!("/anime/{}", id)).await
    }

    async fn search(&self, query: &str, page: &str) -> Result<Vec<AnimeSummary>, DomainError> {
        let page: String = form_urlencoded::byte_serialize(page.as_bytes()).collect();
        self.get_as(&format!("/search/{}?page={}", query, page))
            .await
    }

    async fn fetch_episode(&self, id: &str) -> Result<StreamData, DomainError> {
        self.get(&format!("/episode/{}", id), vec![]).await
    }

    async fn recent(&self, page: &str) -> Result<Vec<AnimeSummary>, DomainError> {
        self.get_as(&format!("/recent/{}", page)).await
    }

    async fn popular(&self, page: &str, page_size: u32) -> Result<Vec<AnimeSummary>, DomainError> {
        self.get_as(&format!("/popular/{}?limit={}", page, page_size))
            .await
    }

    async fn obtain_auth_token(&self) -> Result<String, DomainError> {
        let value = self.get("/auth", vec![]).await?;

        value
            .get("token")
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .ok_or_else(|| DomainError::upstream(PROVIDER, "Auth response carried no token"))
    }

    async fn fetch_download_links(
        &self,
        id: &str,
        token: &str,
    ) -> Result<DownloadLinks, DomainError> {
        self.get(&format!("/download/{}", id), vec![("cookie", token)])
            .await
    }
}
