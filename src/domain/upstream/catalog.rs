//! Video catalog collaborator contract

use async_trait::async_trait;

use crate::domain::anime::{AnimeRecord, AnimeSummary, DownloadLinks, StreamData};
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Scraped video catalog: entity pages, search, episodes and listings.
///
/// Page arguments are forwarded verbatim; the catalog decides how to read them.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait VideoCatalogSource: Send + Sync {
    /// Fetches the full record for an entity id
    async fn fetch_entity(&self, id: &str) -> Result<AnimeRecord, DomainError>;

    /// Free-text search, ordered by relevance
    async fn search(&self, query: &str, page: &str) -> Result<Vec<AnimeSummary>, DomainError>;

    /// Stream sources for one episode
    async fn fetch_episode(&self, id: &str) -> Result<StreamData, DomainError>;

    /// Recently released episodes
    async fn recent(&self, page: &str) -> Result<Vec<AnimeSummary>, DomainError>;

    /// Popular titles, `page_size` entries per page
    async fn popular(&self, page: &str, page_size: u32) -> Result<Vec<AnimeSummary>, DomainError>;

    /// Obtains a short-lived token required by the download endpoint
    async fn obtain_auth_token(&self) -> Result<String, DomainError>;

    /// Download links for one episode, authorised by `token`
    async fn fetch_download_links(&self, id: &str, token: &str)
        -> Result<DownloadLinks, DomainError>;
}
