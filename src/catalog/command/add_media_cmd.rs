use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::catalog::domain::CatalogService;
use crate::core::command::{require_librarian, Command, CommandError};
use crate::core::domain::Principal;
use crate::core::library::MediaKind;
use crate::medias::dto::MediaDto;

pub(crate) struct AddMediaCommand {
    catalog_service: Box<dyn CatalogService>,
    principal: Principal,
}

impl AddMediaCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>, principal: Principal) -> Self {
        Self {
            catalog_service,
            principal,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddMediaCommandRequest {
    title: String,
    kind: MediaKind,
    author: Option<String>,
}

impl AddMediaCommandRequest {
    pub fn new(title: &str, kind: MediaKind, author: Option<&str>) -> Self {
        Self {
            title: title.to_string(),
            kind,
            author: author.map(str::to_string),
        }
    }
}


#[derive(Debug, Serialize)]
pub(crate) struct AddMediaCommandResponse {
    media: MediaDto,
}

impl AddMediaCommandResponse {
    pub fn new(media: MediaDto) -> Self {
        Self {
            media,
        }
    }
}

#[async_trait]
impl Command<AddMediaCommandRequest, AddMediaCommandResponse> for AddMediaCommand {
    async fn execute(&self, req: AddMediaCommandRequest) -> Result<AddMediaCommandResponse, CommandError> {
        require_librarian(&self.principal)?;
        let media = MediaDto::new(req.title.as_str(), req.kind, req.author.as_deref());
        self.catalog_service.add_media(&media)
            .await.map_err(CommandError::from).map(AddMediaCommandResponse::new)
    }
}
