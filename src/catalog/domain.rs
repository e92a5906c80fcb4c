pub mod service;

use async_trait::async_trait;
use crate::core::library::{LibraryResult, PaginatedResult};
use crate::medias::dto::MediaDto;

#[async_trait]
pub(crate) trait CatalogService: Sync + Send {
    async fn add_media(&self, media: &MediaDto) -> LibraryResult<MediaDto>;
    async fn find_media_by_id(&self, id: &str) -> LibraryResult<MediaDto>;
    async fn list_medias(&self, page: Option<&str>,
                         page_size: usize) -> LibraryResult<PaginatedResult<MediaDto>>;
}
