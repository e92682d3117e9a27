//! AniList GraphQL adapter for the metadata source

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::domain::anime::{AnimeSummary, UpcomingPage};
use crate::domain::upstream::MetadataSource;
use crate::domain::DomainError;

use super::http_client::HttpClientTrait;

const PROVIDER: &str = "anilist";

/// Public AniList GraphQL endpoint
pub const DEFAULT_ANILIST_URL: &str = "https://graphql.anilist.co";

const PER_PAGE: u32 = 20;

const MEDIA_FIELDS: &str = "id title { romaji english } coverImage { large } format status episodes";

#[derive(Debug)]
pub struct AnilistSource {
    client: Arc<dyn HttpClientTrait>,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct PageData {
    #[serde(rename = "Page")]
    page: MediaPage,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MediaPage {
    #[serde(default)]
    page_info: Option<PageInfo>,
    #[serde(default)]
    media: Vec<Media>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    #[serde(default)]
    has_next_page: bool,
}

#[derive(Debug, Deserialize)]
struct MediaData {
    #[serde(rename = "Media")]
    media: Option<MediaWithRecommendations>,
}

#[derive(Debug, Deserialize)]
struct MediaWithRecommendations {
    recommendations: RecommendationConnection,
}

#[derive(Debug, Deserialize)]
struct RecommendationConnection {
    #[serde(default)]
    nodes: Vec<RecommendationNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecommendationNode {
    media_recommendation: Option<Media>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Media {
    id: i64,
    title: MediaTitle,
    cover_image: Option<CoverImage>,
    format: Option<String>,
    status: Option<String>,
    episodes: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct MediaTitle {
    romaji: Option<String>,
    english: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CoverImage {
    large: Option<String>,
}

impl From<Media> for AnimeSummary {
    fn from(media: Media) -> Self {
        let title = media
            .title
            .english
            .or(media.title.romaji)
            .unwrap_or_default();

        let mut summary = AnimeSummary::new(media.id.to_string(), title);

        if let Some(image) = media.cover_image.and_then(|c| c.large) {
            summary = summary.with_field("image", image);
        }
        if let Some(format) = media.format {
            summary = summary.with_field("format", format);
        }
        if let Some(status) = media.status {
            summary = summary.with_field("status", status);
        }
        if let Some(episodes) = media.episodes {
            summary = summary.with_field("episodes", episodes);
        }

        summary
    }
}

impl AnilistSource {
    pub fn new(client: Arc<dyn HttpClientTrait>, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    async fn query<T: DeserializeOwned>(
        &self,
        query: String,
        variables: Value,
    ) -> Result<T, DomainError> {
        debug!(endpoint = %self.endpoint, "Querying AniList");

        let body = json!({ "query": query, "variables": variables });
        let value = self
            .client
            .post_json(&self.endpoint, vec![("accept", "application/json")], &body)
            .await?;

        let response: GraphQlResponse<T> = serde_json::from_value(value).map_err(|e| {
            DomainError::upstream(PROVIDER, format!("Unexpected GraphQL payload: {}", e))
        })?;

        if let Some(error) = response.errors.first() {
            return Err(DomainError::upstream(PROVIDER, error.message.clone()));
        }

        response
            .data
            .ok_or_else(|| DomainError::upstream(PROVIDER, "GraphQL response carried no data"))
    }

    async fn media_page(
        &self,
        arguments: &str,
        variables: Value,
    ) -> Result<MediaPage, DomainError> {
        let query = format!(
            "query ($page: Int, $perPage: Int, $search: String) {{ Page(page: $page, perPage: $perPage) {{ pageInfo {{ hasNextPage }} media({}) {{ {} }} }} }}",
            arguments, MEDIA_FIELDS
        );

        let data: PageData = self.query(query, variables).await?;
        Ok(data.page)
    }
}

fn parse_number(kind: &str, raw: &str) -> Result<i64, DomainError> {
    raw.trim()
        .parse()
        .map_err(|_| DomainError::upstream(PROVIDER, format!("Invalid {} '{}'", kind, raw)))
}

#[async_trait]
impl MetadataSource for AnilistSource {
    async fn search(&self, query: &str) -> Result<Vec<AnimeSummary>, DomainError> {
        let page = self
            .media_page(
                "search: $search, type: ANIME",
                json!({ "search": query, "page": 1, "perPage": PER_PAGE }),
            )
            .await?;

        Ok(page.media.into_iter().map(AnimeSummary::from).collect())
    }

    async fn recommendations(&self, id: &str) -> Result<Vec<AnimeSummary>, DomainError> {
        let id = parse_number("media id", id)?;
        let query = format!(
            "query ($id: Int) {{ Media(id: $id, type: ANIME) {{ recommendations(sort: RATING_DESC) {{ nodes {{ mediaRecommendation {{ {} }} }} }} }} }}",
            MEDIA_FIELDS
        );

        let data: MediaData = self.query(query, json!({ "id": id })).await?;
        let media = data
            .media
            .ok_or_else(|| {
                DomainError::upstream(PROVIDER, format!("No media returned for id {}", id))
            })?;

        Ok(media
            .recommendations
            .nodes
            .into_iter()
            .filter_map(|node| node.media_recommendation)
            .map(AnimeSummary::from)
            .collect())
    }

    async fn upcoming(&self, page: &str) -> Result<UpcomingPage, DomainError> {
        let page = parse_number("page", page)?;
        let media_page = self
            .media_page(
                "type: ANIME, status: NOT_YET_RELEASED, sort: POPULARITY_DESC",
                json!({ "page": page, "perPage": PER_PAGE }),
            )
            .await?;

        Ok(UpcomingPage {
            has_next_page: media_page.page_info.is_some_and(|info| info.has_next_page),
            results: media_page.media.into_iter().map(AnimeSummary::from).collect(),
        })
    }

    async fn trending(&self, page: &str) -> Result<Vec<AnimeSummary>, DomainError> {
        let page = parse_number("page", page)?;
        let media_page = self
            .media_page(
                "type: ANIME, sort: TRENDING_DESC",
                json!({ "page": page, "perPage": PER_PAGE }),
            )
            .await?;

        Ok(media_page.media.into_iter().map(AnimeSummary::from).collect())
    }
}
