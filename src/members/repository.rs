pub mod ddb_member_repository;
pub mod memory_member_repository;

use async_trait::async_trait;
use crate::core::library::{LibraryResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::members::domain::model::MemberEntity;


#[async_trait]
pub(crate) trait MemberRepository: Repository<MemberEntity> {
    // email is unique among members, yet lookups return a list so the
    // service can detect a corrupted duplicate instead of masking it
    async fn find_by_email(&self, email: &str) -> LibraryResult<Vec<MemberEntity>>;

    async fn find_by_account_id(&self, account_id: &str) -> LibraryResult<Vec<MemberEntity>>;

    async fn find_all(&self, page: Option<&str>,
                      page_size: usize) -> LibraryResult<PaginatedResult<MemberEntity>>;
}
