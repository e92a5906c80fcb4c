use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::domain::Identifiable;
use crate::utils::date::serializer;

// MemberEntity abstracts a borrower. The account_id references the external
// identity provider record the member was provisioned from; email is unique
// among members whenever present.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct MemberEntity {
    pub member_id: String,
    pub version: i64,
    pub account_id: String,
    // "name" is a DynamoDB reserved word, so the attribute is full_name
    #[serde(rename = "full_name")]
    pub name: String,
    pub email: Option<String>,
    pub blocked: bool,
    pub admin: bool,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl MemberEntity {
    pub fn new(account_id: &str, name: &str, email: Option<&str>) -> Self {
        Self {
            member_id: Uuid::new_v4().to_string(),
            version: 0,
            account_id: account_id.to_string(),
            name: name.to_string(),
            email: email.map(str::to_string),
            blocked: false,
            admin: false,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl Identifiable for MemberEntity {
    fn id(&self) -> String {
        self.member_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use crate::members::domain::model::MemberEntity;

    #[tokio::test]
    async fn test_should_build_member() {
        let member = MemberEntity::new("acct1", "Jean Dupont", Some("jean@example.com"));
        assert_eq!("acct1", member.account_id.as_str());
        assert_eq!("Jean Dupont", member.name.as_str());
        assert_eq!(Some("jean@example.com".to_string()), member.email);
        assert!(!member.blocked);
        assert!(!member.admin);
    }
}
