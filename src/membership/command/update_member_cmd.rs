use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{require_librarian, Command, CommandError};
use crate::core::domain::Principal;
use crate::membership::domain::MemberService;
use crate::membership::dto::MemberDto;

pub(crate) struct UpdateMemberCommand {
    member_service: Box<dyn MemberService>,
    principal: Principal,
}

impl UpdateMemberCommand {
    pub(crate) fn new(member_service: Box<dyn MemberService>, principal: Principal) -> Self {
        Self {
            member_service,
            principal,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpdateMemberCommandRequest {
    #[serde(default)]
    pub member_id: String,
    name: String,
    email: Option<String>,
}

impl UpdateMemberCommandRequest {
    pub fn new(member_id: &str, name: &str, email: Option<&str>) -> Self {
        Self {
            member_id: member_id.to_string(),
            name: name.to_string(),
            email: email.map(str::to_string),
        }
    }
}


#[derive(Debug, Serialize)]
pub(crate) struct UpdateMemberCommandResponse {
    member: MemberDto,
}

impl UpdateMemberCommandResponse {
    pub fn new(member: MemberDto) -> Self {
        Self {
            member,
        }
    }
}

#[async_trait]
impl Command<UpdateMemberCommandRequest, UpdateMemberCommandResponse> for UpdateMemberCommand {
    async fn execute(&self, req: UpdateMemberCommandRequest) -> Result<UpdateMemberCommandResponse, CommandError> {
        require_librarian(&self.principal)?;
        // load-then-save keeps the optimistic version check in the repository
        let mut member = self.member_service.find_member_by_id(req.member_id.as_str()).await?;
        member.name = req.name;
        member.email = req.email;
        self.member_service.update_member(&member)
            .await.map_err(CommandError::from).map(UpdateMemberCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;
    use crate::core::command::Command;
    use crate::core::domain::{Configuration, Principal};
    use crate::core::repository::RepositoryStore;
    use crate::membership::command::update_member_cmd::{UpdateMemberCommand, UpdateMemberCommandRequest};
    use crate::membership::domain::MemberService;
    use crate::membership::dto::MemberDto;
    use crate::membership::factory::create_member_service;

    async fn new_service() -> Box<dyn MemberService> {
        create_member_service(&Configuration::new("test"), RepositoryStore::InMemory).await
    }

    #[tokio::test]
    async fn test_should_run_update_member() {
        let svc = new_service().await;
        let member = MemberDto::new("acct-upd-cmd", "Romain Gary", None);
        let _ = svc.add_member(&member).await.expect("should add member");

        let email = format!("{}@example.com", Uuid::new_v4());
        let cmd = UpdateMemberCommand::new(svc, Principal::librarian("acct1"));
        let res = cmd.execute(UpdateMemberCommandRequest::new(
            member.member_id.as_str(), "Emile Ajar", Some(email.as_str())))
            .await.expect("should update member");
        assert_eq!("Emile Ajar", res.member.name.as_str());
        assert_eq!(Some(email), res.member.email);
    }
}
