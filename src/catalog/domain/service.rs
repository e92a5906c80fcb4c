use std::collections::HashMap;
use async_trait::async_trait;
use crate::catalog::domain::CatalogService;
use crate::core::domain::Configuration;
use crate::core::events::DomainEvent;
use crate::core::library::{LibraryResult, PaginatedResult};
use crate::gateway::events::EventPublisher;
use crate::medias::domain::model::MediaEntity;
use crate::medias::dto::MediaDto;
use crate::medias::repository::MediaRepository;

pub(crate) struct CatalogServiceImpl {
    media_repository: Box<dyn MediaRepository>,
    events_publisher: Box<dyn EventPublisher>,
}

impl CatalogServiceImpl {
    pub(crate) fn new(_config: &Configuration, media_repository: Box<dyn MediaRepository>,
                      events_publisher: Box<dyn EventPublisher>) -> Self {
        Self {
            media_repository,
            events_publisher,
        }
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn add_media(&self, media: &MediaDto) -> LibraryResult<MediaDto> {
        let _ = self.media_repository.create(&MediaEntity::from(media)).await.map(|_| ())?;
        let _ = self.events_publisher.publish(&DomainEvent::added(
            "media_added", "medias", media.media_id.as_str(), &HashMap::new(), media)?).await;
        Ok(media.clone())
    }

    async fn find_media_by_id(&self, id: &str) -> LibraryResult<MediaDto> {
        self.media_repository.get(id).await.map(|m| MediaDto::from(&m))
    }

    async fn list_medias(&self, page: Option<&str>,
                         page_size: usize) -> LibraryResult<PaginatedResult<MediaDto>> {
        let res = self.media_repository.find_all(page, page_size).await?;
        let records = res.records.iter().map(MediaDto::from).collect();
        Ok(PaginatedResult::new(page, page_size, res.next_page, records))
    }
}

impl From<&MediaEntity> for MediaDto {
    fn from(other: &MediaEntity) -> Self {
        Self {
            media_id: other.media_id.to_string(),
            version: other.version,
            title: other.title.to_string(),
            kind: other.kind,
            author: other.author.clone(),
            available: other.available,
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

impl From<&MediaDto> for MediaEntity {
    fn from(other: &MediaDto) -> Self {
        Self {
            media_id: other.media_id.to_string(),
            version: other.version,
            title: other.title.to_string(),
            kind: other.kind,
            author: other.author.clone(),
            available: other.available,
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}
