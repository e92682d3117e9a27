//! Domain layer - Core entities, routing rules and collaborator traits

pub mod anime;
pub mod cache;
pub mod error;
pub mod route;
pub mod upstream;

pub use anime::{AnimeId, AnimeRecord, AnimeSummary, SourceTag, UpcomingPage};
pub use cache::{CacheEntry, CacheStore, CacheStoreExt, Clock, SystemClock};
pub use error::DomainError;
pub use route::{CachePolicy, Route, RouteKind, RouteSpec, RouteTarget, ROUTE_TABLE};
pub use upstream::{ErrorRecorder, MetadataSource, VideoCatalogSource, ViewRecorder};
