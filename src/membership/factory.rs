use crate::circulation::factory::create_loan_repository;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::gateway::factory::create_publisher;
use crate::members::factory::create_member_repository;
use crate::membership::domain::{AccountObserver, MemberService};
use crate::membership::domain::service::MemberServiceImpl;

pub(crate) async fn create_member_service(config: &Configuration, store: RepositoryStore) -> Box<dyn MemberService> {
    Box::new(build_service(config, store).await)
}

pub(crate) async fn create_account_observer(config: &Configuration, store: RepositoryStore) -> Box<dyn AccountObserver> {
    Box::new(build_service(config, store).await)
}

async fn build_service(config: &Configuration, store: RepositoryStore) -> MemberServiceImpl {
    let member_repo = create_member_repository(store).await;
    let loan_repo = create_loan_repository(store).await;
    let publisher = create_publisher(store.gateway_publisher()).await;
    MemberServiceImpl::new(config, member_repo, loan_repo, publisher)
}
