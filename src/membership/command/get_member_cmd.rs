use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{require_librarian, Command, CommandError};
use crate::core::domain::Principal;
use crate::membership::domain::MemberService;
use crate::membership::dto::MemberDto;

pub(crate) struct GetMemberCommand {
    member_service: Box<dyn MemberService>,
    principal: Principal,
}

impl GetMemberCommand {
    pub(crate) fn new(member_service: Box<dyn MemberService>, principal: Principal) -> Self {
        Self {
            member_service,
            principal,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GetMemberCommandRequest {
    pub member_id: String,
}

impl GetMemberCommandRequest {
    pub fn new(member_id: &str) -> Self {
        Self {
            member_id: member_id.to_string(),
        }
    }
}


#[derive(Debug, Serialize)]
pub(crate) struct GetMemberCommandResponse {
    member: MemberDto,
}

impl GetMemberCommandResponse {
    pub fn new(member: MemberDto) -> Self {
        Self {
            member,
        }
    }
}

#[async_trait]
impl Command<GetMemberCommandRequest, GetMemberCommandResponse> for GetMemberCommand {
    async fn execute(&self, req: GetMemberCommandRequest) -> Result<GetMemberCommandResponse, CommandError> {
        require_librarian(&self.principal)?;
        self.member_service.find_member_by_id(req.member_id.as_str())
            .await.map_err(CommandError::from).map(GetMemberCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::{Configuration, Principal};
    use crate::core::repository::RepositoryStore;
    use crate::membership::command::get_member_cmd::{GetMemberCommand, GetMemberCommandRequest};
    use crate::membership::domain::MemberService;
    use crate::membership::dto::MemberDto;
    use crate::membership::factory::create_member_service;

    async fn new_service() -> Box<dyn MemberService> {
        create_member_service(&Configuration::new("test"), RepositoryStore::InMemory).await
    }

    #[tokio::test]
    async fn test_should_run_get_member() {
        let svc = new_service().await;
        let member = MemberDto::new("acct-get-cmd", "Nathalie Sarraute", None);
        let _ = svc.add_member(&member).await.expect("should add member");

        let cmd = GetMemberCommand::new(svc, Principal::librarian("acct1"));
        let res = cmd.execute(GetMemberCommandRequest::new(member.member_id.as_str()))
            .await.expect("should get member");
        assert_eq!(member.member_id, res.member.member_id);
    }

    #[tokio::test]
    async fn test_should_map_missing_member() {
        let cmd = GetMemberCommand::new(new_service().await, Principal::librarian("acct1"));
        let err = cmd.execute(GetMemberCommandRequest::new("no-such-member"))
            .await.expect_err("should not find member");
        assert!(matches!(err, CommandError::NotFound { .. }));
    }
}
