use std::collections::HashMap;
use async_trait::async_trait;
use crate::circulation::repository::LoanRepository;
use crate::core::domain::Configuration;
use crate::core::events::DomainEvent;
use crate::core::library::{LibraryError, LibraryResult, PaginatedResult, ValidationKind};
use crate::gateway::events::EventPublisher;
use crate::members::domain::model::MemberEntity;
use crate::members::repository::MemberRepository;
use crate::membership::domain::{AccountObserver, MemberService};
use crate::membership::dto::MemberDto;

pub(crate) struct MemberServiceImpl {
    member_repository: Box<dyn MemberRepository>,
    loan_repository: Box<dyn LoanRepository>,
    events_publisher: Box<dyn EventPublisher>,
}

impl MemberServiceImpl {
    pub(crate) fn new(_config: &Configuration, member_repository: Box<dyn MemberRepository>,
                      loan_repository: Box<dyn LoanRepository>,
                      events_publisher: Box<dyn EventPublisher>) -> Self {
        Self {
            member_repository,
            loan_repository,
            events_publisher,
        }
    }

    // email is unique among members; the store backends enforce it again on
    // write, this check is what surfaces the business-rule error
    async fn check_email_free(&self, member: &MemberDto) -> LibraryResult<()> {
        let Some(email) = member.email.as_deref() else {
            return Ok(());
        };
        let existing = self.member_repository.find_by_email(email).await?;
        if existing.iter().any(|m| m.member_id != member.member_id) {
            return Err(LibraryError::validation(ValidationKind::DuplicateEmail,
                                                format!("email {} is already registered", email).as_str()));
        }
        Ok(())
    }
}

#[async_trait]
impl MemberService for MemberServiceImpl {
    async fn add_member(&self, member: &MemberDto) -> LibraryResult<MemberDto> {
        self.check_email_free(member).await?;
        let _ = self.member_repository.create(&MemberEntity::from(member)).await.map(|_| ())?;
        let _ = self.events_publisher.publish(&DomainEvent::added(
            "member_added", "members", member.member_id.as_str(), &HashMap::new(), member)?).await;
        Ok(member.clone())
    }

    async fn update_member(&self, member: &MemberDto) -> LibraryResult<MemberDto> {
        self.check_email_free(member).await?;
        let _ = self.member_repository.update(&MemberEntity::from(member)).await.map(|_| ())?;
        let _ = self.events_publisher.publish(&DomainEvent::updated(
            "member_updated", "members", member.member_id.as_str(), &HashMap::new(), member)?).await;
        Ok(member.clone())
    }

    async fn remove_member(&self, id: &str) -> LibraryResult<()> {
        let _ = self.loan_repository.delete_by_member(id).await?;
        let res = self.member_repository.delete(id).await.map(|_| ())?;
        let data = id.to_string();
        let _ = self.events_publisher.publish(&DomainEvent::deleted(
            "member_removed", "members", id, &HashMap::new(), &data)?).await;
        Ok(res)
    }

    async fn set_blocked(&self, id: &str, blocked: bool) -> LibraryResult<MemberDto> {
        let mut existing = self.member_repository.get(id).await?;
        existing.blocked = blocked;
        self.member_repository.update(&existing).await?;
        let member = MemberDto::from(&existing);
        let _ = self.events_publisher.publish(&DomainEvent::updated(
            "member_blocked", "members", id, &HashMap::new(), &member)?).await;
        Ok(member)
    }

    async fn find_member_by_id(&self, id: &str) -> LibraryResult<MemberDto> {
        let entity = self.member_repository.get(id).await?;
        let mut member = MemberDto::from(&entity);
        member.active_loans = self.loan_repository.count_open_by_member(id).await?;
        Ok(member)
    }

    async fn find_members_by_email(&self, email: &str) -> LibraryResult<Vec<MemberDto>> {
        let res = self.member_repository.find_by_email(email).await?;
        Ok(res.iter().map(MemberDto::from).collect())
    }

    async fn list_members(&self, page: Option<&str>,
                          page_size: usize) -> LibraryResult<PaginatedResult<MemberDto>> {
        let res = self.member_repository.find_all(page, page_size).await?;
        let records = res.records.iter().map(MemberDto::from).collect();
        Ok(PaginatedResult::new(page, page_size, res.next_page, records))
    }
}

#[async_trait]
impl AccountObserver for MemberServiceImpl {
    async fn on_account_created(&self, account_id: &str, name: &str,
                                email: Option<&str>) -> LibraryResult<MemberDto> {
        let existing = self.member_repository.find_by_account_id(account_id).await?;
        if let Some(first) = existing.first() {
            return Ok(MemberDto::from(first));
        }
        self.add_member(&MemberDto::new(account_id, name, email)).await
    }
}

impl From<&MemberEntity> for MemberDto {
    fn from(other: &MemberEntity) -> Self {
        Self {
            member_id: other.member_id.to_string(),
            version: other.version,
            account_id: other.account_id.to_string(),
            name: other.name.to_string(),
            email: other.email.clone(),
            blocked: other.blocked,
            admin: other.admin,
            active_loans: 0,
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

impl From<&MemberDto> for MemberEntity {
    fn from(other: &MemberDto) -> Self {
        Self {
            member_id: other.member_id.to_string(),
            version: other.version,
            account_id: other.account_id.to_string(),
            name: other.name.to_string(),
            email: other.email.clone(),
            blocked: other.blocked,
            admin: other.admin,
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}
