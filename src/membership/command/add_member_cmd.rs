use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{require_librarian, Command, CommandError};
use crate::core::domain::Principal;
use crate::membership::domain::AccountObserver;
use crate::membership::dto::MemberDto;

// Registration goes through the account observer so that every account
// gets its member record the same way, whether created here or upstream.
pub(crate) struct AddMemberCommand {
    account_observer: Box<dyn AccountObserver>,
    principal: Principal,
}

impl AddMemberCommand {
    pub(crate) fn new(account_observer: Box<dyn AccountObserver>, principal: Principal) -> Self {
        Self {
            account_observer,
            principal,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddMemberCommandRequest {
    account_id: String,
    name: String,
    email: Option<String>,
}

impl AddMemberCommandRequest {
    pub fn new(account_id: &str, name: &str, email: Option<&str>) -> Self {
        Self {
            account_id: account_id.to_string(),
            name: name.to_string(),
            email: email.map(str::to_string),
        }
    }
}


#[derive(Debug, Serialize)]
pub(crate) struct AddMemberCommandResponse {
    member: MemberDto,
}

impl AddMemberCommandResponse {
    pub fn new(member: MemberDto) -> Self {
        Self {
            member,
        }
    }
}

#[async_trait]
impl Command<AddMemberCommandRequest, AddMemberCommandResponse> for AddMemberCommand {
    async fn execute(&self, req: AddMemberCommandRequest) -> Result<AddMemberCommandResponse, CommandError> {
        require_librarian(&self.principal)?;
        self.account_observer.on_account_created(
            req.account_id.as_str(), req.name.as_str(), req.email.as_deref())
            .await.map_err(CommandError::from).map(AddMemberCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::{Configuration, Principal};
    use crate::core::library::Role;
    use crate::core::repository::RepositoryStore;
    use crate::membership::command::add_member_cmd::{AddMemberCommand, AddMemberCommandRequest};
    use crate::membership::domain::AccountObserver;
    use crate::membership::factory::create_account_observer;

    async fn new_observer() -> Box<dyn AccountObserver> {
        create_account_observer(&Configuration::new("test"), RepositoryStore::InMemory).await
    }

    #[tokio::test]
    async fn test_should_run_add_member() {
        let cmd = AddMemberCommand::new(new_observer().await, Principal::librarian("acct1"));
        let email = format!("{}@example.com", Uuid::new_v4());
        let res = cmd.execute(AddMemberCommandRequest::new(
            "acct-new", "Albert Camus", Some(email.as_str())))
            .await.expect("should add member");
        assert_eq!("Albert Camus", res.member.name.as_str());
        assert_eq!("acct-new", res.member.account_id.as_str());
    }

    #[tokio::test]
    async fn test_should_reject_non_librarian() {
        let cmd = AddMemberCommand::new(new_observer().await, Principal::new("acct2", vec![Role::Member]));
        let err = cmd.execute(AddMemberCommandRequest::new("acct-no", "Refused Member", None))
            .await.expect_err("should reject non librarian");
        assert!(matches!(err, CommandError::Access { .. }));
    }
}
