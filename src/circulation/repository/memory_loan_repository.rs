use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;

use crate::circulation::domain::model::LoanEntity;
use crate::circulation::repository::LoanRepository;
use crate::core::library::{LibraryError, LibraryResult, LoanStatus, PaginatedResult, ValidationKind};
use crate::core::repository::Repository;
use crate::utils::mem::{lock_database, paginate};

// Dev and test backed loan repository on the shared in-memory database. The
// borrow and give_back primitives read the media row and write both tables
// under the one database lock, matching the transactional writes of the
// production store.
#[derive(Debug)]
pub(crate) struct MemoryLoanRepository {}

impl MemoryLoanRepository {
    pub(crate) fn new() -> Self {
        Self {}
    }
}

fn matches_predicate(loan: &LoanEntity, predicate: &HashMap<String, String>) -> bool {
    for (k, v) in predicate {
        let matched = match k.as_str() {
            "loan_status" => loan.loan_status.to_string() == *v,
            "member_id" => loan.member_id == *v,
            "media_id" => loan.media_id == *v,
            "branch_id" => loan.branch_id == *v,
            "due_date:<=" => loan.due_date.format(crate::utils::date::DATE_FMT).to_string() <= *v,
            _ => true,
        };
        if !matched {
            return false;
        }
    }
    true
}

#[async_trait]
impl Repository<LoanEntity> for MemoryLoanRepository {
    async fn create(&self, entity: &LoanEntity) -> LibraryResult<usize> {
        let mut db = lock_database();
        if db.loans.contains_key(entity.loan_id.as_str()) {
            return Err(LibraryError::duplicate_key(
                format!("loan {} already exists", entity.loan_id).as_str()));
        }
        db.loans.insert(entity.loan_id.clone(), entity.clone());
        Ok(1)
    }

    async fn update(&self, entity: &LoanEntity) -> LibraryResult<usize> {
        let mut db = lock_database();
        match db.loans.get_mut(entity.loan_id.as_str()) {
            Some(existing) => {
                if existing.version != entity.version {
                    return Err(LibraryError::database(
                        format!("loan {} version mismatch", entity.loan_id).as_str(), None, false));
                }
                let mut updated = entity.clone();
                updated.version = entity.version + 1;
                updated.updated_at = Utc::now().naive_utc();
                *existing = updated;
                Ok(1)
            }
            None => Err(LibraryError::not_found(
                format!("loan not found for {}", entity.loan_id).as_str())),
        }
    }

    async fn get(&self, id: &str) -> LibraryResult<LoanEntity> {
        let db = lock_database();
        db.loans.get(id).cloned().ok_or_else(|| {
            LibraryError::not_found(format!("loan not found for {}", id).as_str())
        })
    }

    async fn delete(&self, id: &str) -> LibraryResult<usize> {
        let mut db = lock_database();
        db.loans.remove(id);
        Ok(1)
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<LoanEntity>> {
        let db = lock_database();
        let mut records: Vec<LoanEntity> = db.loans.values()
            .filter(|loan| matches_predicate(loan, predicate))
            .cloned().collect();
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at)
            .then_with(|| a.loan_id.cmp(&b.loan_id)));
        Ok(paginate(records, page, page_size))
    }
}

#[async_trait]
impl LoanRepository for MemoryLoanRepository {
    async fn borrow(&self, loan: &LoanEntity) -> LibraryResult<usize> {
        let mut db = lock_database();
        if db.loans.contains_key(loan.loan_id.as_str()) {
            return Err(LibraryError::duplicate_key(
                format!("loan {} already exists", loan.loan_id).as_str()));
        }
        let media = db.medias.get_mut(loan.media_id.as_str()).ok_or_else(|| {
            LibraryError::not_found(format!("media not found for {}", loan.media_id).as_str())
        })?;
        if !media.available {
            return Err(LibraryError::validation(ValidationKind::AlreadyBorrowed,
                                                format!("media {} is not available", loan.media_id).as_str()));
        }
        media.available = false;
        media.version += 1;
        media.updated_at = Utc::now().naive_utc();
        db.loans.insert(loan.loan_id.clone(), loan.clone());
        Ok(1)
    }

    async fn give_back(&self, loan: &LoanEntity) -> LibraryResult<usize> {
        let mut db = lock_database();
        let existing = db.loans.get(loan.loan_id.as_str()).ok_or_else(|| {
            LibraryError::not_found(format!("loan not found for {}", loan.loan_id).as_str())
        })?;
        if existing.version != loan.version {
            return Err(LibraryError::database(
                format!("loan {} version mismatch", loan.loan_id).as_str(), None, false));
        }
        let mut closed = loan.clone();
        closed.version = loan.version + 1;
        closed.updated_at = Utc::now().naive_utc();
        db.loans.insert(closed.loan_id.clone(), closed);
        if let Some(media) = db.medias.get_mut(loan.media_id.as_str()) {
            media.available = true;
            media.version += 1;
            media.updated_at = Utc::now().naive_utc();
        }
        Ok(1)
    }

    async fn find_open_by_media(&self, media_id: &str) -> LibraryResult<Option<LoanEntity>> {
        let db = lock_database();
        let mut open: Vec<LoanEntity> = db.loans.values()
            .filter(|loan| loan.media_id == media_id && loan.is_open())
            .cloned().collect();
        if open.len() > 1 {
            return Err(LibraryError::database(
                format!("multiple open loans for media {}", media_id).as_str(), None, false));
        }
        Ok(open.pop())
    }

    async fn count_open_by_member(&self, member_id: &str) -> LibraryResult<usize> {
        let db = lock_database();
        Ok(db.loans.values()
            .filter(|loan| loan.member_id == member_id && loan.is_open())
            .count())
    }

    async fn find_by_member(&self, member_id: &str, page: Option<&str>,
                            page_size: usize) -> LibraryResult<PaginatedResult<LoanEntity>> {
        let predicate = HashMap::from([
            ("member_id".to_string(), member_id.to_string()),
        ]);
        self.query(&predicate, page, page_size).await
    }

    async fn delete_by_member(&self, member_id: &str) -> LibraryResult<usize> {
        let mut db = lock_database();
        let ids: Vec<String> = db.loans.values()
            .filter(|loan| loan.member_id == member_id)
            .map(|loan| loan.loan_id.clone()).collect();
        for id in &ids {
            db.loans.remove(id);
        }
        Ok(ids.len())
    }

    async fn query_overdue(&self, predicate: &HashMap<String, String>,
                           page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<LoanEntity>> {
        let now = Utc::now().naive_utc();
        let db = lock_database();
        let mut records: Vec<LoanEntity> = db.loans.values()
            .filter(|loan| loan.is_overdue(now) && matches_predicate(loan, predicate))
            .cloned().collect();
        records.sort_by(|a, b| a.due_date.cmp(&b.due_date)
            .then_with(|| a.loan_id.cmp(&b.loan_id)));
        Ok(paginate(records, page, page_size))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use chrono::Utc;

    use crate::circulation::domain::model::LoanEntity;
    use crate::circulation::repository::LoanRepository;
    use crate::circulation::repository::memory_loan_repository::MemoryLoanRepository;
    use crate::core::library::{MediaKind, ValidationKind};
    use crate::core::repository::Repository;
    use crate::medias::domain::model::MediaEntity;
    use crate::medias::repository::memory_media_repository::MemoryMediaRepository;

    async fn add_media(title: &str) -> MediaEntity {
        let media_repo = MemoryMediaRepository::new();
        let media = MediaEntity::new(title, MediaKind::Book, None);
        media_repo.create(&media).await.expect("should create media");
        media
    }

    #[tokio::test]
    async fn test_should_borrow_and_flip_availability() {
        let loan_repo = MemoryLoanRepository::new();
        let media_repo = MemoryMediaRepository::new();
        let media = add_media("Germinal").await;

        let loan = LoanEntity::new("branch1", "member1", media.media_id.as_str(), 7);
        let size = loan_repo.borrow(&loan).await.expect("should borrow");
        assert_eq!(1, size);

        let loaded = media_repo.get(media.media_id.as_str()).await.expect("should return media");
        assert!(!loaded.available);

        let open = loan_repo.find_open_by_media(media.media_id.as_str()).await
            .expect("should find open loan");
        assert_eq!(Some(loan.loan_id.clone()), open.map(|l| l.loan_id));
    }

    #[tokio::test]
    async fn test_should_reject_second_borrow() {
        let loan_repo = MemoryLoanRepository::new();
        let media = add_media("Bel-Ami").await;

        let first = LoanEntity::new("branch1", "member1", media.media_id.as_str(), 7);
        loan_repo.borrow(&first).await.expect("should borrow");

        let second = LoanEntity::new("branch1", "member2", media.media_id.as_str(), 7);
        let err = loan_repo.borrow(&second).await.expect_err("should reject second borrow");
        assert_eq!(Some(ValidationKind::AlreadyBorrowed), err.validation_kind());
    }

    #[tokio::test]
    async fn test_should_allow_exactly_one_concurrent_borrow() {
        let media = add_media("Le Comte de Monte-Cristo").await;
        let loan_repo = Arc::new(MemoryLoanRepository::new());

        let mut handles = vec![];
        for i in 0..2 {
            let repo = loan_repo.clone();
            let media_id = media.media_id.clone();
            handles.push(tokio::spawn(async move {
                let loan = LoanEntity::new("branch1",
                                           format!("member{}", i).as_str(), media_id.as_str(), 7);
                repo.borrow(&loan).await
            }));
        }
        let mut wins = 0;
        for handle in handles {
            if handle.await.expect("task should not panic").is_ok() {
                wins += 1;
            }
        }
        assert_eq!(1, wins);
    }

    #[tokio::test]
    async fn test_should_give_back_and_restore_availability() {
        let loan_repo = MemoryLoanRepository::new();
        let media_repo = MemoryMediaRepository::new();
        let media = add_media("La Peste").await;

        let mut loan = LoanEntity::new("branch1", "member1", media.media_id.as_str(), 7);
        loan_repo.borrow(&loan).await.expect("should borrow");

        loan.mark_returned(Utc::now().naive_utc());
        let size = loan_repo.give_back(&loan).await.expect("should give back");
        assert_eq!(1, size);

        let loaded = media_repo.get(media.media_id.as_str()).await.expect("should return media");
        assert!(loaded.available);
        assert_eq!(None, loan_repo.find_open_by_media(media.media_id.as_str()).await
            .expect("should query open loans").map(|l| l.loan_id));
    }

    #[tokio::test]
    async fn test_should_count_open_loans_by_member() {
        let loan_repo = MemoryLoanRepository::new();
        let member_id = "member-count";
        for _ in 0..2 {
            let media = add_media("Les Misérables").await;
            let loan = LoanEntity::new("branch1", member_id, media.media_id.as_str(), 7);
            loan_repo.borrow(&loan).await.expect("should borrow");
        }
        let count = loan_repo.count_open_by_member(member_id).await.expect("should count loans");
        assert_eq!(2, count);
    }

    #[tokio::test]
    async fn test_should_query_overdue_loans() {
        let loan_repo = MemoryLoanRepository::new();
        let media = add_media("Notre-Dame de Paris").await;
        // a negative loan period puts the due date in the past
        let loan = LoanEntity::new("branch1", "member-late", media.media_id.as_str(), -1);
        loan_repo.borrow(&loan).await.expect("should borrow");

        let res = loan_repo.query_overdue(&std::collections::HashMap::new(), None, 500).await
            .expect("should query overdue");
        assert!(res.records.iter().any(|l| l.loan_id == loan.loan_id));
    }

    #[tokio::test]
    async fn test_should_find_loans_by_member() {
        let loan_repo = MemoryLoanRepository::new();
        let member_id = "member-history";
        let media = add_media("Boule de Suif").await;
        let mut loan = LoanEntity::new("branch1", member_id, media.media_id.as_str(), 7);
        loan_repo.borrow(&loan).await.expect("should borrow");
        loan.mark_returned(Utc::now().naive_utc());
        loan_repo.give_back(&loan).await.expect("should give back");

        // history includes closed loans
        let res = loan_repo.find_by_member(member_id, None, 500).await
            .expect("should find loans by member");
        assert!(res.records.iter().any(|l| l.loan_id == loan.loan_id));
    }

    #[tokio::test]
    async fn test_should_delete_loans_by_member() {
        let loan_repo = MemoryLoanRepository::new();
        let media = add_media("Candide").await;
        let loan = LoanEntity::new("branch1", "member-del", media.media_id.as_str(), 7);
        loan_repo.borrow(&loan).await.expect("should borrow");

        let deleted = loan_repo.delete_by_member("member-del").await.expect("should delete loans");
        assert_eq!(1, deleted);
        assert!(loan_repo.get(loan.loan_id.as_str()).await.is_err());
    }
}
