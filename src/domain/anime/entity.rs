//! Anime records and search summaries

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque entity identifier understood by the video catalog
pub type AnimeId = String;

/// Episode stream payload, passed through untouched
pub type StreamData = Value;

/// Download links payload, passed through untouched
pub type DownloadLinks = Value;

/// Provider that produced a resolved record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceTag {
    Gogoanime,
}

/// A single candidate in a search result or listing page.
///
/// Only `id` and `title` are interpreted; every other field the upstream
/// returns is carried through as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimeSummary {
    #[serde(default)]
    pub id: AnimeId,
    #[serde(default)]
    pub title: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AnimeSummary {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            extra: Map::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Full entity record returned by the video catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimeRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceTag>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl AnimeRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: None,
            details: Map::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// A record counts as a hit only when it carries a non-blank name.
    /// Upstreams answer unknown ids with empty placeholder pages.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
    }

    pub fn with_source(mut self, source: SourceTag) -> Self {
        self.source = Some(source);
        self
    }
}

/// One page of upcoming titles from the metadata source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingPage {
    pub results: Vec<AnimeSummary>,
    #[serde(default)]
    pub has_next_page: bool,
}
