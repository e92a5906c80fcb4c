use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{require_librarian, Command, CommandError};
use crate::core::domain::Principal;
use crate::membership::domain::MemberService;

pub(crate) struct RemoveMemberCommand {
    member_service: Box<dyn MemberService>,
    principal: Principal,
}

impl RemoveMemberCommand {
    pub(crate) fn new(member_service: Box<dyn MemberService>, principal: Principal) -> Self {
        Self {
            member_service,
            principal,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RemoveMemberCommandRequest {
    pub member_id: String,
}

impl RemoveMemberCommandRequest {
    pub fn new(member_id: &str) -> Self {
        Self {
            member_id: member_id.to_string(),
        }
    }
}


#[derive(Debug, Serialize)]
pub(crate) struct RemoveMemberCommandResponse {
    member_id: String,
}

#[async_trait]
impl Command<RemoveMemberCommandRequest, RemoveMemberCommandResponse> for RemoveMemberCommand {
    async fn execute(&self, req: RemoveMemberCommandRequest) -> Result<RemoveMemberCommandResponse, CommandError> {
        require_librarian(&self.principal)?;
        self.member_service.remove_member(req.member_id.as_str()).await?;
        Ok(RemoveMemberCommandResponse { member_id: req.member_id })
    }
}

#[cfg(test)]
mod tests {
    use crate::core::command::Command;
    use crate::core::domain::{Configuration, Principal};
    use crate::core::repository::RepositoryStore;
    use crate::membership::command::remove_member_cmd::{RemoveMemberCommand, RemoveMemberCommandRequest};
    use crate::membership::domain::MemberService;
    use crate::membership::dto::MemberDto;
    use crate::membership::factory::create_member_service;

    async fn new_service() -> Box<dyn MemberService> {
        create_member_service(&Configuration::new("test"), RepositoryStore::InMemory).await
    }

    #[tokio::test]
    async fn test_should_run_remove_member() {
        let svc = new_service().await;
        let member = MemberDto::new("acct-rm-cmd", "Membre Sortant", None);
        let _ = svc.add_member(&member).await.expect("should add member");

        let cmd = RemoveMemberCommand::new(new_service().await, Principal::librarian("acct1"));
        let _ = cmd.execute(RemoveMemberCommandRequest::new(member.member_id.as_str()))
            .await.expect("should remove member");

        assert!(svc.find_member_by_id(member.member_id.as_str()).await.is_err());
    }
}
