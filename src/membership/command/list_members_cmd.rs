use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{require_librarian, Command, CommandError};
use crate::core::domain::Principal;
use crate::membership::domain::MemberService;
use crate::membership::dto::MemberDto;

pub(crate) struct ListMembersCommand {
    member_service: Box<dyn MemberService>,
    principal: Principal,
}

impl ListMembersCommand {
    pub(crate) fn new(member_service: Box<dyn MemberService>, principal: Principal) -> Self {
        Self {
            member_service,
            principal,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListMembersCommandRequest {
    page: Option<String>,
    page_size: Option<usize>,
}

impl ListMembersCommandRequest {
    pub fn new(page: Option<&str>, page_size: Option<usize>) -> Self {
        Self {
            page: page.map(str::to_string),
            page_size,
        }
    }
}


#[derive(Debug, Serialize)]
pub(crate) struct ListMembersCommandResponse {
    members: Vec<MemberDto>,
    next_page: Option<String>,
}

#[async_trait]
impl Command<ListMembersCommandRequest, ListMembersCommandResponse> for ListMembersCommand {
    async fn execute(&self, req: ListMembersCommandRequest) -> Result<ListMembersCommandResponse, CommandError> {
        require_librarian(&self.principal)?;
        let res = self.member_service.list_members(
            req.page.as_deref(), req.page_size.unwrap_or(20)).await?;
        Ok(ListMembersCommandResponse {
            members: res.records,
            next_page: res.next_page,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::core::command::Command;
    use crate::core::domain::{Configuration, Principal};
    use crate::core::repository::RepositoryStore;
    use crate::membership::command::list_members_cmd::{ListMembersCommand, ListMembersCommandRequest};
    use crate::membership::domain::MemberService;
    use crate::membership::dto::MemberDto;
    use crate::membership::factory::create_member_service;

    async fn new_service() -> Box<dyn MemberService> {
        create_member_service(&Configuration::new("test"), RepositoryStore::InMemory).await
    }

    #[tokio::test]
    async fn test_should_run_list_members() {
        let svc = new_service().await;
        let member = MemberDto::new("acct-list-cmd", "Marguerite Duras", None);
        let _ = svc.add_member(&member).await.expect("should add member");

        let cmd = ListMembersCommand::new(svc, Principal::librarian("acct1"));
        let res = cmd.execute(ListMembersCommandRequest::new(None, Some(500)))
            .await.expect("should list members");
        assert!(res.members.iter().any(|m| m.member_id == member.member_id));
    }
}
