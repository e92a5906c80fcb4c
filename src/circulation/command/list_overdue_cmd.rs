use std::collections::HashMap;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::circulation::domain::CirculationService;
use crate::circulation::dto::LoanDto;
use crate::core::command::{require_librarian, Command, CommandError};
use crate::core::domain::Principal;

pub(crate) struct ListOverdueCommand {
    circulation_service: Box<dyn CirculationService>,
    principal: Principal,
}

impl ListOverdueCommand {
    pub(crate) fn new(circulation_service: Box<dyn CirculationService>, principal: Principal) -> Self {
        Self {
            circulation_service,
            principal,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListOverdueCommandRequest {
    page: Option<String>,
    page_size: Option<usize>,
}

impl ListOverdueCommandRequest {
    pub fn new(page: Option<&str>, page_size: Option<usize>) -> Self {
        Self {
            page: page.map(str::to_string),
            page_size,
        }
    }
}


#[derive(Debug, Serialize)]
pub(crate) struct ListOverdueCommandResponse {
    loans: Vec<LoanDto>,
    next_page: Option<String>,
}

#[async_trait]
impl Command<ListOverdueCommandRequest, ListOverdueCommandResponse> for ListOverdueCommand {
    async fn execute(&self, req: ListOverdueCommandRequest) -> Result<ListOverdueCommandResponse, CommandError> {
        require_librarian(&self.principal)?;
        let res = self.circulation_service.query_overdue(
            &HashMap::new(), req.page.as_deref(), req.page_size.unwrap_or(20)).await?;
        Ok(ListOverdueCommandResponse {
            loans: res.records,
            next_page: res.next_page,
        })
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;
    use crate::catalog::factory::create_catalog_service;
    use crate::circulation::command::list_overdue_cmd::{ListOverdueCommand, ListOverdueCommandRequest};
    use crate::circulation::factory::create_circulation_service;
    use crate::core::command::Command;
    use crate::core::domain::{Configuration, Principal};
    use crate::core::library::MediaKind;
    use crate::core::repository::RepositoryStore;
    use crate::medias::dto::MediaDto;
    use crate::membership::dto::MemberDto;
    use crate::membership::factory::create_member_service;

    #[tokio::test]
    async fn test_should_run_list_overdue() {
        let config = Configuration::new("test");
        let store = RepositoryStore::InMemory;
        let member_svc = create_member_service(&config, store).await;
        let catalog_svc = create_catalog_service(&config, store).await;
        let circulation_svc = create_circulation_service(&config, store).await;

        let member = member_svc.add_member(&MemberDto::new(
            Uuid::new_v4().to_string().as_str(), "Lecteur Distrait", None)).await.expect("should add member");
        let media = catalog_svc.add_media(&MediaDto::new(
            "Germinal", MediaKind::Book, Some("Émile Zola"))).await.expect("should add media");
        let loan = circulation_svc.borrow_media(member.member_id.as_str(), media.media_id.as_str())
            .await.expect("should borrow media");

        // fresh loans are not yet overdue
        let cmd = ListOverdueCommand::new(circulation_svc, Principal::librarian("acct1"));
        let res = cmd.execute(ListOverdueCommandRequest::new(None, Some(500)))
            .await.expect("should list overdue loans");
        assert!(!res.loans.iter().any(|l| l.loan_id == loan.loan_id));
    }
}
