//! Read-only media catalog lookups

use std::sync::Arc;
use tracing::error;

use super::{ServiceError, ServiceResult, ensure_positive};
use crate::{
    models::{
        MediaId,
        media::{MediaItem, MediaQuery, MediaType},
    },
    repositories::MediaCatalog,
};

/// Search results are capped at this many items
pub const SEARCH_LIMIT: i64 = 20;

#[derive(Clone)]
pub struct MediaService {
    catalog: Arc<dyn MediaCatalog>,
}

impl MediaService {
    pub fn new(catalog: Arc<dyn MediaCatalog>) -> Self {
        Self { catalog }
    }

    pub async fn get(&self, media_id: MediaId) -> ServiceResult<MediaItem> {
        ensure_positive("media_id", media_id)?;

        self.catalog
            .find_media(media_id)
            .await
            .inspect_err(|e| error!(media_id, error = %e, "Failed to load media"))?
            .ok_or(ServiceError::MediaNotFound)
    }

    /// Filter by type and/or case-insensitive name substring
    pub async fn search(&self, query: MediaQuery) -> ServiceResult<Vec<MediaItem>> {
        let media_type = match query.media_type.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<MediaType>().map_err(ServiceError::Validation)?),
        };
        let name = query
            .name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());

        if media_type.is_none() && name.is_none() {
            return Err(ServiceError::Validation(
                "at least one of 'type' or 'name' is required".to_string(),
            ));
        }

        self.catalog
            .search_media(media_type, name, SEARCH_LIMIT)
            .await
            .inspect_err(|e| error!(error = %e, "Failed to search media"))
            .map_err(ServiceError::from)
    }
}
