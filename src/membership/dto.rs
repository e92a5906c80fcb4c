use chrono::{NaiveDateTime, Utc};
use uuid::Uuid;
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::utils::date::serializer;

// MemberDto is a data transfer object for the member registry. active_loans
// is derived at read time and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct MemberDto {
    pub member_id: String,
    pub version: i64,
    pub account_id: String,
    pub name: String,
    pub email: Option<String>,
    pub blocked: bool,
    pub admin: bool,
    #[serde(default)]
    pub active_loans: usize,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl MemberDto {
    pub fn new(account_id: &str, name: &str, email: Option<&str>) -> MemberDto {
        MemberDto {
            member_id: Uuid::new_v4().to_string(),
            version: 0,
            account_id: account_id.to_string(),
            name: name.to_string(),
            email: email.map(str::to_string),
            blocked: false,
            admin: false,
            active_loans: 0,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl Identifiable for MemberDto {
    fn id(&self) -> String {
        self.member_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}
