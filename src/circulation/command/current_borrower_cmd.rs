use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::circulation::domain::CirculationService;
use crate::core::command::{require_librarian, Command, CommandError};
use crate::core::domain::Principal;
use crate::membership::dto::MemberDto;

pub(crate) struct CurrentBorrowerCommand {
    circulation_service: Box<dyn CirculationService>,
    principal: Principal,
}

impl CurrentBorrowerCommand {
    pub(crate) fn new(circulation_service: Box<dyn CirculationService>, principal: Principal) -> Self {
        Self {
            circulation_service,
            principal,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CurrentBorrowerCommandRequest {
    pub media_id: String,
}

impl CurrentBorrowerCommandRequest {
    pub fn new(media_id: &str) -> Self {
        Self {
            media_id: media_id.to_string(),
        }
    }
}


// borrower is None when the media sits on the shelf
#[derive(Debug, Serialize)]
pub(crate) struct CurrentBorrowerCommandResponse {
    borrower: Option<MemberDto>,
}

#[async_trait]
impl Command<CurrentBorrowerCommandRequest, CurrentBorrowerCommandResponse> for CurrentBorrowerCommand {
    async fn execute(&self, req: CurrentBorrowerCommandRequest) -> Result<CurrentBorrowerCommandResponse, CommandError> {
        require_librarian(&self.principal)?;
        let borrower = self.circulation_service.current_borrower(req.media_id.as_str()).await?;
        Ok(CurrentBorrowerCommandResponse { borrower })
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;
    use crate::catalog::factory::create_catalog_service;
    use crate::circulation::command::current_borrower_cmd::{CurrentBorrowerCommand, CurrentBorrowerCommandRequest};
    use crate::circulation::factory::create_circulation_service;
    use crate::core::command::Command;
    use crate::core::domain::{Configuration, Principal};
    use crate::core::library::MediaKind;
    use crate::core::repository::RepositoryStore;
    use crate::medias::dto::MediaDto;
    use crate::membership::dto::MemberDto;
    use crate::membership::factory::create_member_service;

    #[tokio::test]
    async fn test_should_run_current_borrower() {
        let config = Configuration::new("test");
        let store = RepositoryStore::InMemory;
        let member_svc = create_member_service(&config, store).await;
        let catalog_svc = create_catalog_service(&config, store).await;
        let circulation_svc = create_circulation_service(&config, store).await;

        let member = member_svc.add_member(&MemberDto::new(
            Uuid::new_v4().to_string().as_str(), "Emprunteur Courant", None)).await.expect("should add member");
        let media = catalog_svc.add_media(&MediaDto::new(
            "Madame Bovary", MediaKind::Book, Some("Gustave Flaubert"))).await.expect("should add media");

        let cmd = CurrentBorrowerCommand::new(circulation_svc, Principal::librarian("acct1"));
        let res = cmd.execute(CurrentBorrowerCommandRequest::new(media.media_id.as_str()))
            .await.expect("should query borrower");
        assert!(res.borrower.is_none());

        let svc = create_circulation_service(&config, store).await;
        let _ = svc.borrow_media(member.member_id.as_str(), media.media_id.as_str())
            .await.expect("should borrow media");

        let res = cmd.execute(CurrentBorrowerCommandRequest::new(media.media_id.as_str()))
            .await.expect("should query borrower");
        assert_eq!(Some(member.member_id), res.borrower.map(|m| m.member_id));
    }
}
