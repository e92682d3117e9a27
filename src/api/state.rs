//! Application state for shared services

use std::sync::Arc;

use crate::domain::upstream::{ErrorRecorder, ViewRecorder};
use crate::infrastructure::services::AnimeService;

/// Application state shared by every handler and middleware.
///
/// One instance per process; the cache inside `anime_service` lives as long
/// as the state does.
#[derive(Clone)]
pub struct AppState {
    pub anime_service: Arc<AnimeService>,
    pub view_recorder: Arc<dyn ViewRecorder>,
    pub error_recorder: Arc<dyn ErrorRecorder>,
}

impl AppState {
    pub fn new(
        anime_service: Arc<AnimeService>,
        view_recorder: Arc<dyn ViewRecorder>,
        error_recorder: Arc<dyn ErrorRecorder>,
    ) -> Self {
        Self {
            anime_service,
            view_recorder,
            error_recorder,
        }
    }
}
