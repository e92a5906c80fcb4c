use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;

use crate::core::library::{LibraryError, LibraryResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::medias::domain::model::MediaEntity;
use crate::medias::repository::MediaRepository;
use crate::utils::mem::{lock_database, paginate};

// Dev and test backed media repository on the shared in-memory database.
#[derive(Debug)]
pub struct MemoryMediaRepository {}

impl MemoryMediaRepository {
    pub(crate) fn new() -> Self {
        Self {}
    }
}

fn matches_predicate(media: &MediaEntity, predicate: &HashMap<String, String>) -> bool {
    for (k, v) in predicate {
        let matched = match k.as_str() {
            "kind" => media.kind.to_string() == *v,
            "title" => media.title == *v,
            "available" => media.available.to_string() == *v,
            "author" => media.author.as_deref() == Some(v.as_str()),
            _ => true,
        };
        if !matched {
            return false;
        }
    }
    true
}

#[async_trait]
impl Repository<MediaEntity> for MemoryMediaRepository {
    async fn create(&self, entity: &MediaEntity) -> LibraryResult<usize> {
        let mut db = lock_database();
        if db.medias.contains_key(entity.media_id.as_str()) {
            return Err(LibraryError::duplicate_key(
                format!("media {} already exists", entity.media_id).as_str()));
        }
        db.medias.insert(entity.media_id.clone(), entity.clone());
        Ok(1)
    }

    async fn update(&self, entity: &MediaEntity) -> LibraryResult<usize> {
        let mut db = lock_database();
        match db.medias.get_mut(entity.media_id.as_str()) {
            Some(existing) => {
                if existing.version != entity.version {
                    return Err(LibraryError::database(
                        format!("media {} version mismatch", entity.media_id).as_str(), None, false));
                }
                let mut updated = entity.clone();
                updated.version = entity.version + 1;
                updated.updated_at = Utc::now().naive_utc();
                *existing = updated;
                Ok(1)
            }
            None => Err(LibraryError::not_found(
                format!("media not found for {}", entity.media_id).as_str())),
        }
    }

    async fn get(&self, id: &str) -> LibraryResult<MediaEntity> {
        let db = lock_database();
        db.medias.get(id).cloned().ok_or_else(|| {
            LibraryError::not_found(format!("media not found for {}", id).as_str())
        })
    }

    async fn delete(&self, id: &str) -> LibraryResult<usize> {
        let mut db = lock_database();
        db.medias.remove(id);
        Ok(1)
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<MediaEntity>> {
        let db = lock_database();
        let mut records: Vec<MediaEntity> = db.medias.values()
            .filter(|media| matches_predicate(media, predicate))
            .cloned().collect();
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at)
            .then_with(|| a.media_id.cmp(&b.media_id)));
        Ok(paginate(records, page, page_size))
    }
}

#[async_trait]
impl MediaRepository for MemoryMediaRepository {
    async fn find_all(&self, page: Option<&str>,
                      page_size: usize) -> LibraryResult<PaginatedResult<MediaEntity>> {
        self.query(&HashMap::new(), page, page_size).await
    }
}
