use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::medias::dto::MediaDto;

// Catalog lookups are public, so this command carries no principal.
pub(crate) struct GetMediaCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl GetMediaCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GetMediaCommandRequest {
    media_id: String,
}

impl GetMediaCommandRequest {
    pub fn new(media_id: &str) -> Self {
        Self {
            media_id: media_id.to_string(),
        }
    }
}


#[derive(Debug, Serialize)]
pub(crate) struct GetMediaCommandResponse {
    media: MediaDto,
}

impl GetMediaCommandResponse {
    pub fn new(media: MediaDto) -> Self {
        Self {
            media,
        }
    }
}

#[async_trait]
impl Command<GetMediaCommandRequest, GetMediaCommandResponse> for GetMediaCommand {
    async fn execute(&self, req: GetMediaCommandRequest) -> Result<GetMediaCommandResponse, CommandError> {
        self.catalog_service.find_media_by_id(req.media_id.as_str())
            .await.map_err(CommandError::from).map(GetMediaCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::command::get_media_cmd::{GetMediaCommand, GetMediaCommandRequest};
    use crate::catalog::domain::CatalogService;
    use crate::catalog::factory::create_catalog_service;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::library::MediaKind;
    use crate::core::repository::RepositoryStore;
    use crate::medias::dto::MediaDto;

    async fn new_service() -> Box<dyn CatalogService> {
        create_catalog_service(&Configuration::new("test"), RepositoryStore::InMemory).await
    }

    #[tokio::test]
    async fn test_should_run_get_media() {
        let svc = new_service().await;
        let media = MediaDto::new("Au Bonheur des Dames", MediaKind::Book, Some("Émile Zola"));
        let _ = svc.add_media(&media).await.expect("should add media");

        let cmd = GetMediaCommand::new(svc);
        let res = cmd.execute(GetMediaCommandRequest::new(media.media_id.as_str()))
            .await.expect("should get media");
        assert_eq!(media.media_id, res.media.media_id);
    }

    #[tokio::test]
    async fn test_should_map_missing_media() {
        let cmd = GetMediaCommand::new(new_service().await);
        let err = cmd.execute(GetMediaCommandRequest::new("no-such-media"))
            .await.expect_err("should not find media");
        assert!(matches!(err, CommandError::NotFound { .. }));
    }
}
