use crate::circulation::domain::CirculationService;
use crate::circulation::domain::service::CirculationServiceImpl;
use crate::circulation::repository::LoanRepository;
use crate::circulation::repository::ddb_loan_repository::DDBLoanRepository;
use crate::circulation::repository::memory_loan_repository::MemoryLoanRepository;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::gateway::factory::create_publisher;
use crate::medias::factory::create_media_repository;
use crate::members::factory::create_member_repository;
use crate::utils::ddb::build_db_client;

pub(crate) async fn create_loan_repository(store: RepositoryStore) -> Box<dyn LoanRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client().await;
            Box::new(DDBLoanRepository::new(client, "loans", "loans_ndx", "medias"))
        }
        RepositoryStore::InMemory => {
            Box::new(MemoryLoanRepository::new())
        }
    }
}

pub(crate) async fn create_circulation_service(config: &Configuration, store: RepositoryStore) -> Box<dyn CirculationService> {
    let loan_repo = create_loan_repository(store).await;
    let media_repo = create_media_repository(store).await;
    let member_repo = create_member_repository(store).await;
    let publisher = create_publisher(store.gateway_publisher()).await;
    Box::new(CirculationServiceImpl::new(config, loan_repo, media_repo, member_repo, publisher))
}
