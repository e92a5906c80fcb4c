use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::medias::dto::MediaDto;

pub(crate) struct ListMediasCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl ListMediasCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListMediasCommandRequest {
    page: Option<String>,
    page_size: Option<usize>,
}

impl ListMediasCommandRequest {
    pub fn new(page: Option<&str>, page_size: Option<usize>) -> Self {
        Self {
            page: page.map(str::to_string),
            page_size,
        }
    }
}


#[derive(Debug, Serialize)]
pub(crate) struct ListMediasCommandResponse {
    medias: Vec<MediaDto>,
    next_page: Option<String>,
}

#[async_trait]
impl Command<ListMediasCommandRequest, ListMediasCommandResponse> for ListMediasCommand {
    async fn execute(&self, req: ListMediasCommandRequest) -> Result<ListMediasCommandResponse, CommandError> {
        let res = self.catalog_service.list_medias(
            req.page.as_deref(), req.page_size.unwrap_or(20)).await?;
        Ok(ListMediasCommandResponse {
            medias: res.records,
            next_page: res.next_page,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::command::list_medias_cmd::{ListMediasCommand, ListMediasCommandRequest};
    use crate::catalog::domain::CatalogService;
    use crate::catalog::factory::create_catalog_service;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;
    use crate::core::library::MediaKind;
    use crate::core::repository::RepositoryStore;
    use crate::medias::dto::MediaDto;

    async fn new_service() -> Box<dyn CatalogService> {
        create_catalog_service(&Configuration::new("test"), RepositoryStore::InMemory).await
    }

    #[tokio::test]
    async fn test_should_run_list_medias() {
        let svc = new_service().await;
        let media = MediaDto::new("La Gloire de mon Père", MediaKind::Book, Some("Marcel Pagnol"));
        let _ = svc.add_media(&media).await.expect("should add media");

        let cmd = ListMediasCommand::new(svc);
        let res = cmd.execute(ListMediasCommandRequest::new(None, Some(500)))
            .await.expect("should list medias");
        assert!(res.medias.iter().any(|m| m.media_id == media.media_id));
    }
}
