use std::collections::HashMap;
use chrono::Utc;
use async_trait::async_trait;
use crate::circulation::domain::CirculationService;
use crate::circulation::domain::model::LoanEntity;
use crate::circulation::dto::LoanDto;
use crate::circulation::repository::LoanRepository;
use crate::core::domain::Configuration;
use crate::core::events::DomainEvent;
use crate::core::library::{LibraryError, LibraryResult, PaginatedResult, ValidationKind};
use crate::gateway::events::EventPublisher;
use crate::medias::repository::MediaRepository;
use crate::members::repository::MemberRepository;
use crate::membership::dto::MemberDto;

pub(crate) struct CirculationServiceImpl {
    branch_id: String,
    max_active_loans: i64,
    loan_period_days: i64,
    loan_repository: Box<dyn LoanRepository>,
    media_repository: Box<dyn MediaRepository>,
    member_repository: Box<dyn MemberRepository>,
    events_publisher: Box<dyn EventPublisher>,
}

impl CirculationServiceImpl {
    pub(crate) fn new(config: &Configuration, loan_repository: Box<dyn LoanRepository>,
                      media_repository: Box<dyn MediaRepository>,
                      member_repository: Box<dyn MemberRepository>,
                      events_publisher: Box<dyn EventPublisher>) -> Self {
        Self {
            branch_id: config.branch_id.to_string(),
            max_active_loans: config.max_active_loans,
            loan_period_days: config.loan_period_days,
            loan_repository,
            media_repository,
            member_repository,
            events_publisher,
        }
    }
}

#[async_trait]
impl CirculationService for CirculationServiceImpl {
    // The precondition order is part of the contract: blocked member, then
    // exclusivity, then the loan cap, then the category rule. The repository
    // re-checks exclusivity inside the atomic write, so a racing borrow still
    // cannot double-lend.
    async fn borrow_media(&self, member_id: &str, media_id: &str) -> LibraryResult<LoanDto> {
        let member = self.member_repository.get(member_id).await?;
        let media = self.media_repository.get(media_id).await?;
        if member.blocked {
            return Err(LibraryError::validation(ValidationKind::MemberBlocked,
                                                format!("member {} is blocked", member_id).as_str()));
        }
        if let Some(open) = self.loan_repository.find_open_by_media(media_id).await? {
            return Err(LibraryError::validation(ValidationKind::AlreadyBorrowed,
                                                format!("media {} is already borrowed under loan {}",
                                                        media_id, open.loan_id).as_str()));
        }
        let active = self.loan_repository.count_open_by_member(member_id).await?;
        if active as i64 >= self.max_active_loans {
            return Err(LibraryError::validation(ValidationKind::BorrowLimitExceeded,
                                                format!("member {} already holds {} open loans",
                                                        member_id, active).as_str()));
        }
        if !media.kind.borrowable() {
            return Err(LibraryError::validation(ValidationKind::NonBorrowableCategory,
                                                format!("media {} of kind {} cannot be borrowed",
                                                        media_id, media.kind).as_str()));
        }
        let entity = LoanEntity::new(self.branch_id.as_str(), member_id, media_id, self.loan_period_days);
        self.loan_repository.borrow(&entity).await?;
        let loan = LoanDto::from(&entity);
        let _ = self.events_publisher.publish(&DomainEvent::added(
            "media_borrowed", "loans", loan.loan_id.as_str(), &HashMap::new(), &loan)?).await;
        Ok(loan)
    }

    async fn return_media(&self, loan_id: &str) -> LibraryResult<LoanDto> {
        let mut existing = self.loan_repository.get(loan_id).await?;
        if !existing.is_open() {
            // already returned, nothing to write
            return Ok(LoanDto::from(&existing));
        }
        existing.mark_returned(Utc::now().naive_utc());
        self.loan_repository.give_back(&existing).await?;
        let loan = LoanDto::from(&existing);
        let _ = self.events_publisher.publish(&DomainEvent::updated(
            "media_returned", "loans", loan.loan_id.as_str(), &HashMap::new(), &loan)?).await;
        Ok(loan)
    }

    async fn member_active_loan_count(&self, member_id: &str) -> LibraryResult<usize> {
        self.loan_repository.count_open_by_member(member_id).await
    }

    async fn current_borrower(&self, media_id: &str) -> LibraryResult<Option<MemberDto>> {
        let Some(open) = self.loan_repository.find_open_by_media(media_id).await? else {
            return Ok(None);
        };
        let member = self.member_repository.get(open.member_id.as_str()).await?;
        Ok(Some(MemberDto::from(&member)))
    }

    async fn query_overdue(&self, predicate: &HashMap<String, String>,
                           page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<LoanDto>> {
        let res = self.loan_repository.query_overdue(predicate, page, page_size).await?;
        let records = res.records.iter().map(LoanDto::from).collect();
        Ok(PaginatedResult::new(page, page_size, res.next_page, records))
    }
}

impl From<&LoanEntity> for LoanDto {
    fn from(other: &LoanEntity) -> LoanDto {
        LoanDto {
            loan_id: other.loan_id.to_string(),
            version: other.version,
            branch_id: other.branch_id.to_string(),
            media_id: other.media_id.to_string(),
            member_id: other.member_id.to_string(),
            loan_status: other.loan_status,
            loan_date: other.loan_date,
            due_date: other.due_date,
            returned_date: other.returned_date,
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

impl From<&LoanDto> for LoanEntity {
    fn from(other: &LoanDto) -> LoanEntity {
        LoanEntity {
            loan_id: other.loan_id.to_string(),
            version: other.version,
            branch_id: other.branch_id.to_string(),
            media_id: other.media_id.to_string(),
            member_id: other.member_id.to_string(),
            loan_status: other.loan_status,
            loan_date: other.loan_date,
            due_date: other.due_date,
            returned_date: other.returned_date,
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}


#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use chrono::Duration;
    use lazy_static::lazy_static;
    use uuid::Uuid;
    use crate::catalog::domain::CatalogService;
    use crate::catalog::factory::create_catalog_service;
    use crate::circulation::domain::CirculationService;
    use crate::circulation::factory;
    use crate::core::domain::Configuration;
    use crate::core::library::{LoanStatus, MediaKind, ValidationKind};
    use crate::core::repository::RepositoryStore;
    use crate::medias::dto::MediaDto;
    use crate::membership::domain::MemberService;
    use crate::membership::dto::MemberDto;
    use crate::membership::factory::create_member_service;

    lazy_static! {
        static ref SUT_SVC: AsyncOnce<Box<dyn CirculationService>> = AsyncOnce::new(async {
                factory::create_circulation_service(&Configuration::new("test"), RepositoryStore::InMemory).await
            });
        static ref CATALOG_SVC: AsyncOnce<Box<dyn CatalogService>> = AsyncOnce::new(async {
                create_catalog_service(&Configuration::new("test"), RepositoryStore::InMemory).await
            });
        static ref MEMBER_SVC: AsyncOnce<Box<dyn MemberService>> = AsyncOnce::new(async {
                create_member_service(&Configuration::new("test"), RepositoryStore::InMemory).await
            });
    }

    async fn add_member(name: &str) -> MemberDto {
        let member = MemberDto::new(Uuid::new_v4().to_string().as_str(), name, None);
        MEMBER_SVC.get().await.add_member(&member).await.expect("should add member")
    }

    async fn add_media(title: &str, kind: MediaKind) -> MediaDto {
        let media = MediaDto::new(title, kind, None);
        CATALOG_SVC.get().await.add_media(&media).await.expect("should add media")
    }

    #[tokio::test]
    async fn test_should_borrow_and_return_media() {
        let circulation_svc = SUT_SVC.get().await.clone();
        let member = add_member("Emprunteur Classique").await;
        let media = add_media("Le Rouge et le Noir", MediaKind::Book).await;

        let loan = circulation_svc.borrow_media(member.member_id.as_str(), media.media_id.as_str())
            .await.expect("should borrow media");
        assert_eq!(LoanStatus::Open, loan.loan_status);
        assert_eq!(loan.loan_date + Duration::days(7), loan.due_date);

        let loaded = CATALOG_SVC.get().await.find_media_by_id(media.media_id.as_str())
            .await.expect("should return media");
        assert!(!loaded.available);

        let returned = circulation_svc.return_media(loan.loan_id.as_str())
            .await.expect("should return media");
        assert_eq!(LoanStatus::Returned, returned.loan_status);
        assert!(returned.returned_date.is_some());

        let loaded = CATALOG_SVC.get().await.find_media_by_id(media.media_id.as_str())
            .await.expect("should return media");
        assert!(loaded.available);
    }

    #[tokio::test]
    async fn test_should_return_idempotently() {
        let circulation_svc = SUT_SVC.get().await.clone();
        let member = add_member("Rendeur Distrait").await;
        let media = add_media("Thérèse Raquin", MediaKind::Book).await;

        let loan = circulation_svc.borrow_media(member.member_id.as_str(), media.media_id.as_str())
            .await.expect("should borrow media");
        let first = circulation_svc.return_media(loan.loan_id.as_str())
            .await.expect("should return media");
        let second = circulation_svc.return_media(loan.loan_id.as_str())
            .await.expect("should tolerate repeated return");
        // the original return date survives the repeat unchanged
        assert_eq!(first.returned_date, second.returned_date);
        assert_eq!(LoanStatus::Returned, second.loan_status);
    }

    #[tokio::test]
    async fn test_should_reject_borrow_of_borrowed_media() {
        let circulation_svc = SUT_SVC.get().await.clone();
        let first = add_member("Premier Arrivé").await;
        let second = add_member("Second Arrivé").await;
        let media = add_media("Cyrano de Bergerac", MediaKind::Book).await;

        let _ = circulation_svc.borrow_media(first.member_id.as_str(), media.media_id.as_str())
            .await.expect("should borrow media");
        let err = circulation_svc.borrow_media(second.member_id.as_str(), media.media_id.as_str())
            .await.expect_err("should reject second borrow");
        assert_eq!(Some(ValidationKind::AlreadyBorrowed), err.validation_kind());
    }

    #[tokio::test]
    async fn test_should_enforce_loan_cap() {
        let circulation_svc = SUT_SVC.get().await.clone();
        let member = add_member("Gros Lecteur").await;
        let mut loans = vec![];
        for i in 0..3 {
            let media = add_media(format!("Tome {}", i).as_str(), MediaKind::Book).await;
            loans.push(circulation_svc.borrow_media(member.member_id.as_str(), media.media_id.as_str())
                .await.expect("should borrow media"));
        }
        assert_eq!(3, circulation_svc.member_active_loan_count(member.member_id.as_str())
            .await.expect("should count loans"));

        let media = add_media("Tome 4", MediaKind::Book).await;
        let err = circulation_svc.borrow_media(member.member_id.as_str(), media.media_id.as_str())
            .await.expect_err("should reject fourth borrow");
        assert_eq!(Some(ValidationKind::BorrowLimitExceeded), err.validation_kind());

        // returning one loan frees a slot
        let _ = circulation_svc.return_media(loans[0].loan_id.as_str())
            .await.expect("should return media");
        let _ = circulation_svc.borrow_media(member.member_id.as_str(), media.media_id.as_str())
            .await.expect("should borrow after freeing a slot");
    }

    #[tokio::test]
    async fn test_should_reject_board_games() {
        let circulation_svc = SUT_SVC.get().await.clone();
        let member = add_member("Joueur Déçu").await;
        let media = add_media("Carcassonne", MediaKind::BoardGame).await;

        let err = circulation_svc.borrow_media(member.member_id.as_str(), media.media_id.as_str())
            .await.expect_err("should reject board game");
        assert_eq!(Some(ValidationKind::NonBorrowableCategory), err.validation_kind());

        // the refusal must not consume the item
        let loaded = CATALOG_SVC.get().await.find_media_by_id(media.media_id.as_str())
            .await.expect("should return media");
        assert!(loaded.available);
    }

    #[tokio::test]
    async fn test_should_reject_blocked_member() {
        let circulation_svc = SUT_SVC.get().await.clone();
        let member = add_member("Membre Bloqué").await;
        let _ = MEMBER_SVC.get().await.set_blocked(member.member_id.as_str(), true)
            .await.expect("should block member");
        let media = add_media("L'Assommoir", MediaKind::Book).await;

        let err = circulation_svc.borrow_media(member.member_id.as_str(), media.media_id.as_str())
            .await.expect_err("should reject blocked member");
        assert_eq!(Some(ValidationKind::MemberBlocked), err.validation_kind());
    }

    #[tokio::test]
    async fn test_should_report_current_borrower() {
        let circulation_svc = SUT_SVC.get().await.clone();
        let member = add_member("Détenteur Courant").await;
        let media = add_media("Une Vie", MediaKind::Book).await;

        assert_eq!(None, circulation_svc.current_borrower(media.media_id.as_str())
            .await.expect("should report no borrower"));

        let loan = circulation_svc.borrow_media(member.member_id.as_str(), media.media_id.as_str())
            .await.expect("should borrow media");
        let borrower = circulation_svc.current_borrower(media.media_id.as_str())
            .await.expect("should report borrower");
        assert_eq!(Some(member.member_id.clone()), borrower.map(|m| m.member_id));

        let _ = circulation_svc.return_media(loan.loan_id.as_str()).await.expect("should return media");
        assert_eq!(None, circulation_svc.current_borrower(media.media_id.as_str())
            .await.expect("should report no borrower after return"));
    }
}
