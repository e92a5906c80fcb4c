pub mod ddb_media_repository;
pub mod memory_media_repository;

use async_trait::async_trait;
use crate::core::library::{LibraryResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::medias::domain::model::MediaEntity;


#[async_trait]
pub(crate) trait MediaRepository: Repository<MediaEntity> {
    // catalog browsing does not filter, so this walks the whole table
    async fn find_all(&self, page: Option<&str>,
                      page_size: usize) -> LibraryResult<PaginatedResult<MediaEntity>>;
}
