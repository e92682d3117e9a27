//! Anime domain - records, summaries and listing pages

mod entity;

pub use entity::{
    AnimeId, AnimeRecord, AnimeSummary, DownloadLinks, SourceTag, StreamData, UpcomingPage,
};
