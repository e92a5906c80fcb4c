pub mod service;

use async_trait::async_trait;
use crate::core::library::{LibraryResult, PaginatedResult};
use crate::membership::dto::MemberDto;

#[async_trait]
pub(crate) trait MemberService: Sync + Send {
    async fn add_member(&self, member: &MemberDto) -> LibraryResult<MemberDto>;
    async fn update_member(&self, member: &MemberDto) -> LibraryResult<MemberDto>;
    // removing a member cascades to its loans
    async fn remove_member(&self, id: &str) -> LibraryResult<()>;
    async fn set_blocked(&self, id: &str, blocked: bool) -> LibraryResult<MemberDto>;
    async fn find_member_by_id(&self, id: &str) -> LibraryResult<MemberDto>;
    async fn find_members_by_email(&self, email: &str) -> LibraryResult<Vec<MemberDto>>;
    async fn list_members(&self, page: Option<&str>,
                          page_size: usize) -> LibraryResult<PaginatedResult<MemberDto>>;
}

// Collaborator invoked synchronously by the account-creation flow so that
// every new account gets a member record without a hidden side channel.
#[async_trait]
pub(crate) trait AccountObserver: Sync + Send {
    async fn on_account_created(&self, account_id: &str, name: &str,
                                email: Option<&str>) -> LibraryResult<MemberDto>;
}
