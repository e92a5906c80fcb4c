use crate::core::repository::RepositoryStore;
use crate::members::repository::MemberRepository;
use crate::members::repository::ddb_member_repository::DDBMemberRepository;
use crate::members::repository::memory_member_repository::MemoryMemberRepository;
use crate::utils::ddb::build_db_client;

pub(crate) async fn create_member_repository(store: RepositoryStore) -> Box<dyn MemberRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client().await;
            Box::new(DDBMemberRepository::new(client, "members", "members_ndx"))
        }
        RepositoryStore::InMemory => {
            Box::new(MemoryMemberRepository::new())
        }
    }
}
