use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{require_librarian, Command, CommandError};
use crate::core::domain::Principal;
use crate::membership::domain::MemberService;
use crate::membership::dto::MemberDto;

pub(crate) struct BlockMemberCommand {
    member_service: Box<dyn MemberService>,
    principal: Principal,
}

impl BlockMemberCommand {
    pub(crate) fn new(member_service: Box<dyn MemberService>, principal: Principal) -> Self {
        Self {
            member_service,
            principal,
        }
    }
}

// blocked=false lifts a block, so one endpoint covers both directions
#[derive(Debug, Deserialize)]
pub(crate) struct BlockMemberCommandRequest {
    #[serde(default)]
    pub member_id: String,
    blocked: bool,
}

impl BlockMemberCommandRequest {
    pub fn new(member_id: &str, blocked: bool) -> Self {
        Self {
            member_id: member_id.to_string(),
            blocked,
        }
    }
}


#[derive(Debug, Serialize)]
pub(crate) struct BlockMemberCommandResponse {
    member: MemberDto,
}

impl BlockMemberCommandResponse {
    pub fn new(member: MemberDto) -> Self {
        Self {
            member,
        }
    }
}

#[async_trait]
impl Command<BlockMemberCommandRequest, BlockMemberCommandResponse> for BlockMemberCommand {
    async fn execute(&self, req: BlockMemberCommandRequest) -> Result<BlockMemberCommandResponse, CommandError> {
        require_librarian(&self.principal)?;
        self.member_service.set_blocked(req.member_id.as_str(), req.blocked)
            .await.map_err(CommandError::from).map(BlockMemberCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use crate::core::command::Command;
    use crate::core::domain::{Configuration, Principal};
    use crate::core::repository::RepositoryStore;
    use crate::membership::command::block_member_cmd::{BlockMemberCommand, BlockMemberCommandRequest};
    use crate::membership::domain::MemberService;
    use crate::membership::dto::MemberDto;
    use crate::membership::factory::create_member_service;

    async fn new_service() -> Box<dyn MemberService> {
        create_member_service(&Configuration::new("test"), RepositoryStore::InMemory).await
    }

    #[tokio::test]
    async fn test_should_run_block_member() {
        let svc = new_service().await;
        let member = MemberDto::new("acct-blk-cmd", "Membre Retardataire", None);
        let _ = svc.add_member(&member).await.expect("should add member");

        let cmd = BlockMemberCommand::new(svc, Principal::librarian("acct1"));
        let res = cmd.execute(BlockMemberCommandRequest::new(member.member_id.as_str(), true))
            .await.expect("should block member");
        assert!(res.member.blocked);

        let res = cmd.execute(BlockMemberCommandRequest::new(member.member_id.as_str(), false))
            .await.expect("should unblock member");
        assert!(!res.member.blocked);
    }
}
