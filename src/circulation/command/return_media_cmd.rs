use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::circulation::domain::CirculationService;
use crate::circulation::dto::LoanDto;
use crate::core::command::{require_librarian, Command, CommandError};
use crate::core::domain::Principal;

pub(crate) struct ReturnMediaCommand {
    circulation_service: Box<dyn CirculationService>,
    principal: Principal,
}

impl ReturnMediaCommand {
    pub(crate) fn new(circulation_service: Box<dyn CirculationService>, principal: Principal) -> Self {
        Self {
            circulation_service,
            principal,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReturnMediaCommandRequest {
    pub loan_id: String,
}

impl ReturnMediaCommandRequest {
    pub fn new(loan_id: &str) -> Self {
        Self {
            loan_id: loan_id.to_string(),
        }
    }
}


#[derive(Debug, Serialize)]
pub(crate) struct ReturnMediaCommandResponse {
    loan: LoanDto,
}

impl ReturnMediaCommandResponse {
    pub fn new(loan: LoanDto) -> Self {
        Self {
            loan,
        }
    }
}

#[async_trait]
impl Command<ReturnMediaCommandRequest, ReturnMediaCommandResponse> for ReturnMediaCommand {
    async fn execute(&self, req: ReturnMediaCommandRequest) -> Result<ReturnMediaCommandResponse, CommandError> {
        require_librarian(&self.principal)?;
        self.circulation_service.return_media(req.loan_id.as_str())
            .await.map_err(CommandError::from).map(ReturnMediaCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;
    use crate::catalog::factory::create_catalog_service;
    use crate::circulation::command::return_media_cmd::{ReturnMediaCommand, ReturnMediaCommandRequest};
    use crate::circulation::domain::CirculationService;
    use crate::circulation::factory::create_circulation_service;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::{Configuration, Principal};
    use crate::core::library::{LoanStatus, MediaKind};
    use crate::core::repository::RepositoryStore;
    use crate::medias::dto::MediaDto;
    use crate::membership::dto::MemberDto;
    use crate::membership::factory::create_member_service;

    async fn new_service() -> Box<dyn CirculationService> {
        create_circulation_service(&Configuration::new("test"), RepositoryStore::InMemory).await
    }

    #[tokio::test]
    async fn test_should_run_return_media() {
        let config = Configuration::new("test");
        let store = RepositoryStore::InMemory;
        let member_svc = create_member_service(&config, store).await;
        let catalog_svc = create_catalog_service(&config, store).await;
        let member = member_svc.add_member(&MemberDto::new(
            Uuid::new_v4().to_string().as_str(), "Rendeur Ponctuel", None)).await.expect("should add member");
        let media = catalog_svc.add_media(&MediaDto::new(
            "Le Petit Prince", MediaKind::Book, Some("Antoine de Saint-Exupéry"))).await.expect("should add media");

        let svc = new_service().await;
        let loan = svc.borrow_media(member.member_id.as_str(), media.media_id.as_str())
            .await.expect("should borrow media");

        let cmd = ReturnMediaCommand::new(svc, Principal::librarian("acct1"));
        let res = cmd.execute(ReturnMediaCommandRequest::new(loan.loan_id.as_str()))
            .await.expect("should return media");
        assert_eq!(LoanStatus::Returned, res.loan.loan_status);
        assert!(res.loan.returned_date.is_some());
    }

    #[tokio::test]
    async fn test_should_map_missing_loan() {
        let cmd = ReturnMediaCommand::new(new_service().await, Principal::librarian("acct1"));
        let err = cmd.execute(ReturnMediaCommandRequest::new("no-such-loan"))
            .await.expect_err("should not find loan");
        assert!(matches!(err, CommandError::NotFound { .. }));
    }
}
