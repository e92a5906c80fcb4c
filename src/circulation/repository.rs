pub mod ddb_loan_repository;
pub mod memory_loan_repository;

use async_trait::async_trait;
use std::collections::HashMap;
use crate::circulation::domain::model::LoanEntity;
use crate::core::library::{LibraryResult, PaginatedResult};
use crate::core::repository::Repository;


#[async_trait]
pub(crate) trait LoanRepository: Repository<LoanEntity> {
    // Atomically records the loan and flips the media to unavailable. Fails
    // with an AlreadyBorrowed validation error when the media has an open
    // loan, however narrow the race.
    async fn borrow(&self, loan: &LoanEntity) -> LibraryResult<usize>;

    // Atomically closes the loan and flips the media back to available. The
    // loan passed in already carries its returned date.
    async fn give_back(&self, loan: &LoanEntity) -> LibraryResult<usize>;

    async fn find_open_by_media(&self, media_id: &str) -> LibraryResult<Option<LoanEntity>>;

    async fn count_open_by_member(&self, member_id: &str) -> LibraryResult<usize>;

    async fn find_by_member(&self, member_id: &str, page: Option<&str>,
                            page_size: usize) -> LibraryResult<PaginatedResult<LoanEntity>>;

    async fn delete_by_member(&self, member_id: &str) -> LibraryResult<usize>;

    async fn query_overdue(&self, predicate: &HashMap::<String, String>,
                           page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<LoanEntity>>;
}
