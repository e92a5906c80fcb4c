use crate::core::repository::RepositoryStore;
use crate::medias::repository::MediaRepository;
use crate::medias::repository::ddb_media_repository::DDBMediaRepository;
use crate::medias::repository::memory_media_repository::MemoryMediaRepository;
use crate::utils::ddb::build_db_client;

pub(crate) async fn create_media_repository(store: RepositoryStore) -> Box<dyn MediaRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client().await;
            Box::new(DDBMediaRepository::new(client, "medias", "medias_ndx"))
        }
        RepositoryStore::InMemory => {
            Box::new(MemoryMediaRepository::new())
        }
    }
}
