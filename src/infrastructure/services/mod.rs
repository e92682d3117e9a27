//! Application services

mod anime_service;
mod fallback_resolver;

pub use anime_service::{AnimeService, DEFAULT_POPULAR_PAGE_SIZE};
pub use fallback_resolver::FallbackResolver;
