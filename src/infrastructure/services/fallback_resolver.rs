//! Entity lookup with search fallback
//!
//! Resolves an id against the video catalog. When the direct lookup fails or
//! returns a placeholder record, the id is treated as a free-text query and
//! the first search hit is fetched instead.

use std::sync::Arc;

use tracing::debug;

use crate::domain::anime::{AnimeRecord, SourceTag};
use crate::domain::route::DEFAULT_SEARCH_PAGE;
use crate::domain::upstream::VideoCatalogSource;
use crate::domain::DomainError;

pub struct FallbackResolver {
    catalog: Arc<dyn VideoCatalogSource>,
    source: SourceTag,
}

impl std::fmt::Debug for FallbackResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackResolver")
            .field("source", &self.source)
            .finish()
    }
}

impl FallbackResolver {
    pub fn new(catalog: Arc<dyn VideoCatalogSource>) -> Self {
        Self {
            catalog,
            source: SourceTag::Gogoanime,
        }
    }

    /// Resolve `id` to a record tagged with the catalog's source.
    ///
    /// The direct lookup is forgiving; the search and the second lookup are
    /// not, and their errors propagate unchanged.
    pub async fn resolve(&self, id: &str) -> Result<AnimeRecord, DomainError> {
        match self.catalog.fetch_entity(id).await {
            Ok(record) if record.is_valid() => {
                debug!(id = %id, "Resolved anime by direct lookup");
                return Ok(record.with_source(self.source));
            }
            Ok(_) => debug!(id = %id, "Direct lookup returned an empty record, searching"),
            Err(e) => debug!(id = %id, error = %e, "Direct lookup failed, searching"),
        }

        let candidates = self.catalog.search(id, DEFAULT_SEARCH_PAGE).await?;

        let first = candidates
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::not_found(format!("No anime matches '{}'", id)))?;

        debug!(id = %id, candidate = %first.id, "Fetching first search candidate");

        let record = self.catalog.fetch_entity(&first.id).await?;
        Ok(record.with_source(self.source))
    }
}
