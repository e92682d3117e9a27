//! Upstream infrastructure - HTTP adapters for the catalog and AniList

mod anilist;
mod catalog;
pub mod http_client;

pub use anilist::{AnilistSource, DEFAULT_ANILIST_URL};
pub use catalog::HttpCatalogSource;
pub use http_client::{HttpClient, HttpClientTrait};
