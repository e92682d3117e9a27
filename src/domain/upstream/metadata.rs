//! Community metadata collaborator contract

use async_trait::async_trait;

use crate::domain::anime::{AnimeSummary, UpcomingPage};
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Community metadata and recommendation source
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Title search, best match first
    async fn search(&self, query: &str) -> Result<Vec<AnimeSummary>, DomainError>;

    /// Recommendations attached to one title
    async fn recommendations(&self, id: &str) -> Result<Vec<AnimeSummary>, DomainError>;

    /// Titles that have not aired yet, most anticipated first
    async fn upcoming(&self, page: &str) -> Result<UpcomingPage, DomainError>;

    /// Currently trending titles
    async fn trending(&self, page: &str) -> Result<Vec<AnimeSummary>, DomainError>;
}
