pub mod model;
pub mod service;

use async_trait::async_trait;
use std::collections::HashMap;
use crate::circulation::dto::LoanDto;
use crate::core::library::{LibraryResult, PaginatedResult};
use crate::membership::dto::MemberDto;

#[async_trait]
pub(crate) trait CirculationService: Sync + Send {
    async fn borrow_media(&self, member_id: &str, media_id: &str) -> LibraryResult<LoanDto>;
    // idempotent: returning an already returned loan is a no-op
    async fn return_media(&self, loan_id: &str) -> LibraryResult<LoanDto>;
    async fn member_active_loan_count(&self, member_id: &str) -> LibraryResult<usize>;
    async fn current_borrower(&self, media_id: &str) -> LibraryResult<Option<MemberDto>>;
    async fn query_overdue(&self, predicate: &HashMap<String, String>,
                           page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<LoanDto>>;
}
