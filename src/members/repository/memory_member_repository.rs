use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;

use crate::core::library::{LibraryError, LibraryResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::members::domain::model::MemberEntity;
use crate::members::repository::MemberRepository;
use crate::utils::mem::{lock_database, paginate};

// Dev and test backed member repository on the shared in-memory database.
// Email uniqueness is enforced here, under the same lock as the write.
#[derive(Debug)]
pub struct MemoryMemberRepository {}

impl MemoryMemberRepository {
    pub(crate) fn new() -> Self {
        Self {}
    }
}

fn email_taken(members: &HashMap<String, MemberEntity>, entity: &MemberEntity) -> bool {
    let Some(email) = entity.email.as_deref() else {
        return false;
    };
    members.values().any(|m| m.member_id != entity.member_id
        && m.email.as_deref() == Some(email))
}

fn matches_predicate(member: &MemberEntity, predicate: &HashMap<String, String>) -> bool {
    for (k, v) in predicate {
        let matched = match k.as_str() {
            "account_id" => member.account_id == *v,
            "email" => member.email.as_deref() == Some(v.as_str()),
            "full_name" => member.name == *v,
            "blocked" => member.blocked.to_string() == *v,
            _ => true,
        };
        if !matched {
            return false;
        }
    }
    true
}

#[async_trait]
impl Repository<MemberEntity> for MemoryMemberRepository {
    async fn create(&self, entity: &MemberEntity) -> LibraryResult<usize> {
        let mut db = lock_database();
        if db.members.contains_key(entity.member_id.as_str()) {
            return Err(LibraryError::duplicate_key(
                format!("member {} already exists", entity.member_id).as_str()));
        }
        if email_taken(&db.members, entity) {
            return Err(LibraryError::duplicate_key(
                format!("member email {:?} already taken", entity.email).as_str()));
        }
        db.members.insert(entity.member_id.clone(), entity.clone());
        Ok(1)
    }

    async fn update(&self, entity: &MemberEntity) -> LibraryResult<usize> {
        let mut db = lock_database();
        if email_taken(&db.members, entity) {
            return Err(LibraryError::duplicate_key(
                format!("member email {:?} already taken", entity.email).as_str()));
        }
        match db.members.get_mut(entity.member_id.as_str()) {
            Some(existing) => {
                if existing.version != entity.version {
                    return Err(LibraryError::database(
                        format!("member {} version mismatch", entity.member_id).as_str(), None, false));
                }
                let mut updated = entity.clone();
                updated.version = entity.version + 1;
                updated.updated_at = Utc::now().naive_utc();
                *existing = updated;
                Ok(1)
            }
            None => Err(LibraryError::not_found(
                format!("member not found for {}", entity.member_id).as_str())),
        }
    }

    async fn get(&self, id: &str) -> LibraryResult<MemberEntity> {
        let db = lock_database();
        db.members.get(id).cloned().ok_or_else(|| {
            LibraryError::not_found(format!("member not found for {}", id).as_str())
        })
    }

    async fn delete(&self, id: &str) -> LibraryResult<usize> {
        let mut db = lock_database();
        db.members.remove(id);
        Ok(1)
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<MemberEntity>> {
        let db = lock_database();
        let mut records: Vec<MemberEntity> = db.members.values()
            .filter(|member| matches_predicate(member, predicate))
            .cloned().collect();
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at)
            .then_with(|| a.member_id.cmp(&b.member_id)));
        Ok(paginate(records, page, page_size))
    }
}

#[async_trait]
impl MemberRepository for MemoryMemberRepository {
    async fn find_by_email(&self, email: &str) -> LibraryResult<Vec<MemberEntity>> {
        let predicate = HashMap::from([
            ("email".to_string(), email.to_string()),
        ]);
        let res = self.query(&predicate, None, 50).await?;
        Ok(res.records)
    }

    async fn find_by_account_id(&self, account_id: &str) -> LibraryResult<Vec<MemberEntity>> {
        let predicate = HashMap::from([
            ("account_id".to_string(), account_id.to_string()),
        ]);
        let res = self.query(&predicate, None, 50).await?;
        Ok(res.records)
    }

    async fn find_all(&self, page: Option<&str>,
                      page_size: usize) -> LibraryResult<PaginatedResult<MemberEntity>> {
        self.query(&HashMap::new(), page, page_size).await
    }
}
