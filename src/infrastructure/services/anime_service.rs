//! Anime service - applies each route's cache policy around its upstream fetch

use std::future::Future;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::domain::anime::AnimeSummary;
use crate::domain::cache::{CacheStore, CacheStoreExt, Clock};
use crate::domain::route::{CachePolicy, Route, RouteTarget};
use crate::domain::upstream::{MetadataSource, VideoCatalogSource};
use crate::domain::DomainError;

use super::fallback_resolver::FallbackResolver;

/// Default number of entries requested per popular listing page
pub const DEFAULT_POPULAR_PAGE_SIZE: u32 = 20;

const DEFAULT_LISTING_PAGE: &str = "1";

#[derive(Serialize)]
struct HomePage {
    trending: Vec<AnimeSummary>,
    popular: Vec<AnimeSummary>,
}

/// Dispatches matched routes to the upstream collaborators through the cache
pub struct AnimeService {
    cache: Arc<dyn CacheStore>,
    clock: Arc<dyn Clock>,
    catalog: Arc<dyn VideoCatalogSource>,
    metadata: Arc<dyn MetadataSource>,
    resolver: FallbackResolver,
    popular_page_size: u32,
}

impl std::fmt::Debug for AnimeService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimeService")
            .field("cache", &self.cache)
            .field("resolver", &self.resolver)
            .field("popular_page_size", &self.popular_page_size)
            .finish()
    }
}

impl AnimeService {
    pub fn new(
        cache: Arc<dyn CacheStore>,
        clock: Arc<dyn Clock>,
        catalog: Arc<dyn VideoCatalogSource>,
        metadata: Arc<dyn MetadataSource>,
    ) -> Self {
        Self {
            cache,
            clock,
            resolver: FallbackResolver::new(Arc::clone(&catalog)),
            catalog,
            metadata,
            popular_page_size: DEFAULT_POPULAR_PAGE_SIZE,
        }
    }

    pub fn with_popular_page_size(mut self, page_size: u32) -> Self {
        self.popular_page_size = page_size;
        self
    }

    /// Produce the `results` payload for a matched route.
    ///
    /// `NotFound` means the client gets a 404; any other error is an upstream
    /// failure.
    pub async fn handle(&self, route: &Route) -> Result<Arc<Value>, DomainError> {
        debug!(route = %route.kind(), "Handling route");

        match route.target() {
            RouteTarget::Search { query, page } => {
                let results = self
                    .cached(route, move || async move {
                        to_json(self.catalog.search(query, page).await?)
                    })
                    .await?;

                if is_empty_list(&results) {
                    return Err(DomainError::not_found(format!("No results for '{}'", query)));
                }

                Ok(results)
            }
            RouteTarget::Anime { id } => {
                self.cached(route, move || async move {
                    to_json(self.resolver.resolve(id).await?)
                })
                .await
            }
            RouteTarget::Episode { id } => {
                self.cached(route, move || async move { self.catalog.fetch_episode(id).await })
                    .await
            }
            RouteTarget::Download { id } => {
                self.cached(route, move || async move {
                    let token = self.catalog.obtain_auth_token().await?;
                    self.catalog.fetch_download_links(id, &token).await
                })
                .await
            }
            RouteTarget::Recent { page } => {
                self.cached(route, move || async move {
                    to_json(self.catalog.recent(page).await?)
                })
                .await
            }
            RouteTarget::Recommendations { query } => {
                self.cached(route, move || async move {
                    let matches = self.metadata.search(query).await?;
                    let first = matches.into_iter().next().ok_or_else(|| {
                        DomainError::not_found(format!("No anime matches '{}'", query))
                    })?;

                    to_json(self.metadata.recommendations(&first.id).await?)
                })
                .await
            }
            RouteTarget::Popular { page } => {
                let page_size = self.popular_page_size;
                self.cached(route, move || async move {
                    to_json(self.catalog.popular(page, page_size).await?)
                })
                .await
            }
            RouteTarget::Upcoming { page } => {
                self.cached(route, move || async move {
                    to_json(self.metadata.upcoming(page).await?.results)
                })
                .await
            }
            RouteTarget::Home => {
                let page_size = self.popular_page_size;
                self.cached(route, move || async move {
                    let (trending, popular) = futures::try_join!(
                        self.metadata.trending(DEFAULT_LISTING_PAGE),
                        self.catalog.popular(DEFAULT_LISTING_PAGE, page_size),
                    )?;

                    to_json(HomePage { trending, popular })
                })
                .await
            }
        }
    }

    /// Runs `fetch` through the cache according to the route's policy
    async fn cached<'a, F, Fut>(
        &'a self,
        route: &'a Route,
        fetch: F,
    ) -> Result<Arc<Value>, DomainError>
    where
        F: FnOnce() -> Fut + Send + 'a,
        Fut: Future<Output = Result<Value, DomainError>> + Send + 'a,
    {
        match (route.policy(), route.cache_key()) {
            (CachePolicy::Ttl(ttl), Some(key)) => {
                let now = self.clock.now_epoch_seconds();
                self.cache.get_or_compute(&key, ttl, now, fetch).await
            }
            _ => Ok(Arc::new(fetch().await?)),
        }
    }
}

fn to_json<T: Serialize>(value: T) -> Result<Value, DomainError> {
    serde_json::to_value(value)
        .map_err(|e| DomainError::internal(format!("Failed to serialize payload: {}", e)))
}

fn is_empty_list(value: &Value) -> bool {
    value.as_array().is_some_and(|items| items.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::anime::{AnimeRecord, UpcomingPage};
    use crate::domain::cache::{ManualClock, MockCacheStore};
    use crate::domain::upstream::{MockMetadataSource, MockVideoCatalogSource};
    use mockall::predicate::eq;
    use serde_json::json;

    struct Fixture {
        cache: Arc<MockCacheStore>,
        clock: Arc<ManualClock>,
        service: AnimeService,
    }

    fn fixture(catalog: MockVideoCatalogSource, metadata: MockMetadataSource) -> Fixture {
        let cache = Arc::new(MockCacheStore::new());
        let clock = Arc::new(ManualClock::at(1_000));
        let service = AnimeService::new(
            cache.clone(),
            clock.clone(),
            Arc::new(catalog),
            Arc::new(metadata),
        );

        Fixture {
            cache,
            clock,
            service,
        }
    }

    fn route(path: &str) -> Route {
        Route::match_path(path, None).unwrap()
    }

    #[tokio::test]
    async fn test_search_is_cached_within_ttl() {
        let mut catalog = MockVideoCatalogSource::new();
        catalog
            .expect_search()
            .with(eq("naruto"), eq("1"))
            .times(1)
            .returning(|_, _| Ok(vec![AnimeSummary::new("naruto-123", "Naruto")]));

        let fx = fixture(catalog, MockMetadataSource::new());
        let route = route("/search/naruto");

        let first = fx.service.handle(&route).await.unwrap();
        fx.clock.advance(3_599);
        let second = fx.service.handle(&route).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*first, json!([{"id": "naruto-123", "title": "Naruto"}]));
    }

    #[tokio::test]
    async fn test_search_refetches_after_expiry() {
        let mut catalog = MockVideoCatalogSource::new();
        catalog
            .expect_search()
            .times(2)
            .returning(|_, _| Ok(vec![AnimeSummary::new("naruto-123", "Naruto")]));

        let fx = fixture(catalog, MockMetadataSource::new());
        let route = route("/search/naruto");

        fx.service.handle(&route).await.unwrap();
        fx.clock.advance(3_601);
        fx.service.handle(&route).await.unwrap();

        let entry = fx.cache.get("search_naruto_1").await.unwrap();
        assert_eq!(entry.inserted_at, 4_601);
    }

    #[tokio::test]
    async fn test_empty_search_is_not_found_but_cached() {
        let mut catalog = MockVideoCatalogSource::new();
        catalog.expect_search().times(1).returning(|_, _| Ok(vec![]));

        let fx = fixture(catalog, MockMetadataSource::new());
        let route = route("/search/zzz");

        assert!(fx.service.handle(&route).await.unwrap_err().is_not_found());
        assert!(fx.service.handle(&route).await.unwrap_err().is_not_found());
        assert_eq!(fx.cache.put_count(), 1);
    }

    #[tokio::test]
    async fn test_anime_not_found_is_not_cached() {
        let mut catalog = MockVideoCatalogSource::new();
        catalog
            .expect_fetch_entity()
            .times(2)
            .returning(|_| Err(DomainError::upstream("catalog", "HTTP 404")));
        catalog.expect_search().times(2).returning(|_, _| Ok(vec![]));

        let fx = fixture(catalog, MockMetadataSource::new());
        let route = route("/anime/unknown-id");

        assert!(fx.service.handle(&route).await.unwrap_err().is_not_found());
        assert!(fx.service.handle(&route).await.unwrap_err().is_not_found());
        assert_eq!(fx.cache.put_count(), 0);
    }

    #[tokio::test]
    async fn test_anime_record_carries_source_tag() {
        let mut catalog = MockVideoCatalogSource::new();
        catalog
            .expect_fetch_entity()
            .times(1)
            .returning(|_| Ok(AnimeRecord::new("Naruto").with_field("type", "TV")));

        let fx = fixture(catalog, MockMetadataSource::new());
        let value = fx.service.handle(&route("/anime/naruto")).await.unwrap();

        assert_eq!(*value, json!({"name": "Naruto", "source": "gogoanime", "type": "TV"}));
        assert!(fx.cache.get("anime_naruto").await.is_some());
    }

    #[tokio::test]
    async fn test_episode_is_never_cached() {
        let mut catalog = MockVideoCatalogSource::new();
        catalog
            .expect_fetch_episode()
            .with(eq("naruto-episode-1"))
            .times(2)
            .returning(|_| Ok(json!({"sources": [{"file": "a.m3u8"}]})));

        let fx = fixture(catalog, MockMetadataSource::new());
        let route = route("/episode/naruto-episode-1");

        fx.service.handle(&route).await.unwrap();
        fx.service.handle(&route).await.unwrap();

        assert!(fx.cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_download_obtains_fresh_token_per_call() {
        let mut catalog = MockVideoCatalogSource::new();
        let mut counter = 0;
        catalog.expect_obtain_auth_token().times(2).returning(move || {
            counter += 1;
            Ok(format!("token-{}", counter))
        });
        catalog
            .expect_fetch_download_links()
            .with(eq("ep-1"), eq("token-1"))
            .times(1)
            .returning(|_, _| Ok(json!({"1080p": "https://dl/1"})));
        catalog
            .expect_fetch_download_links()
            .with(eq("ep-1"), eq("token-2"))
            .times(1)
            .returning(|_, _| Ok(json!({"1080p": "https://dl/2"})));

        let fx = fixture(catalog, MockMetadataSource::new());
        let route = route("/download/ep-1");

        let first = fx.service.handle(&route).await.unwrap();
        let second = fx.service.handle(&route).await.unwrap();

        assert_eq!(first["1080p"], "https://dl/1");
        assert_eq!(second["1080p"], "https://dl/2");
        assert!(fx.cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_recent_ttl_is_five_minutes() {
        let mut catalog = MockVideoCatalogSource::new();
        catalog
            .expect_recent()
            .with(eq("1"))
            .times(2)
            .returning(|_| Ok(vec![AnimeSummary::new("a", "A")]));

        let fx = fixture(catalog, MockMetadataSource::new());
        let route = route("/recent/1");

        fx.service.handle(&route).await.unwrap();
        fx.clock.advance(299);
        fx.service.handle(&route).await.unwrap();
        fx.clock.advance(1);
        fx.service.handle(&route).await.unwrap();
    }

    #[tokio::test]
    async fn test_popular_uses_configured_page_size() {
        let mut catalog = MockVideoCatalogSource::new();
        catalog
            .expect_popular()
            .with(eq("2"), eq(12u32))
            .times(1)
            .returning(|_, _| Ok(vec![AnimeSummary::new("a", "A")]));

        let cache = Arc::new(MockCacheStore::new());
        let service = AnimeService::new(
            cache.clone(),
            Arc::new(ManualClock::at(0)),
            Arc::new(catalog),
            Arc::new(MockMetadataSource::new()),
        )
        .with_popular_page_size(12);

        service.handle(&route("/gogoPopular/2")).await.unwrap();
        assert!(cache.get("gogoPopular_2").await.is_some());
    }

    #[tokio::test]
    async fn test_recommendations_use_first_match() {
        let mut metadata = MockMetadataSource::new();
        metadata
            .expect_search()
            .with(eq("bleach"))
            .times(1)
            .returning(|_| {
                Ok(vec![
                    AnimeSummary::new("269", "Bleach"),
                    AnimeSummary::new("41467", "Bleach: TYBW"),
                ])
            });
        metadata
            .expect_recommendations()
            .with(eq("269"))
            .times(1)
            .returning(|_| Ok(vec![AnimeSummary::new("20", "Naruto")]));

        let fx = fixture(MockVideoCatalogSource::new(), metadata);
        let value = fx
            .service
            .handle(&route("/recommendations/bleach"))
            .await
            .unwrap();

        assert_eq!(*value, json!([{"id": "20", "title": "Naruto"}]));
    }

    #[tokio::test]
    async fn test_recommendations_empty_search_is_not_found() {
        let mut metadata = MockMetadataSource::new();
        metadata.expect_search().times(1).returning(|_| Ok(vec![]));
        metadata.expect_recommendations().never();

        let fx = fixture(MockVideoCatalogSource::new(), metadata);
        let err = fx
            .service
            .handle(&route("/recommendations/zzz"))
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert!(fx.cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_upcoming_unwraps_results() {
        let mut metadata = MockMetadataSource::new();
        metadata.expect_upcoming().with(eq("1")).times(1).returning(|_| {
            Ok(UpcomingPage {
                results: vec![AnimeSummary::new("1", "Soon")],
                has_next_page: true,
            })
        });

        let fx = fixture(MockVideoCatalogSource::new(), metadata);
        let value = fx.service.handle(&route("/upcoming/1")).await.unwrap();

        assert_eq!(*value, json!([{"id": "1", "title": "Soon"}]));
    }

    #[tokio::test]
    async fn test_upstream_failure_propagates() {
        let mut catalog = MockVideoCatalogSource::new();
        catalog
            .expect_recent()
            .times(1)
            .returning(|_| Err(DomainError::upstream("catalog", "HTTP 502")));

        let fx = fixture(catalog, MockMetadataSource::new());
        let err = fx.service.handle(&route("/recent/1")).await.unwrap_err();

        assert!(matches!(err, DomainError::Upstream { .. }));
        assert!(fx.cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_home_combines_trending_and_popular() {
        let mut catalog = MockVideoCatalogSource::new();
        catalog
            .expect_popular()
            .with(eq("1"), eq(20u32))
            .times(1)
            .returning(|_, _| Ok(vec![AnimeSummary::new("one-piece", "One Piece")]));
        let mut metadata = MockMetadataSource::new();
        metadata
            .expect_trending()
            .with(eq("1"))
            .times(1)
            .returning(|_| Ok(vec![AnimeSummary::new("21", "One Piece")]));

        let fx = fixture(catalog, metadata);
        let first = fx.service.handle(&route("/home")).await.unwrap();
        let second = fx.service.handle(&route("/home")).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first["trending"][0]["id"], "21");
        assert_eq!(first["popular"][0]["id"], "one-piece");
    }
}
