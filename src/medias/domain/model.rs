use chrono::{NaiveDateTime, Utc};
use uuid::Uuid;
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::core::library::MediaKind;
use crate::utils::date::serializer;

// MediaEntity abstracts a single physical catalog item. The library holds one
// copy per record, so `available` toggles with the item's single open loan
// and only the circulation primitives may flip it.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct MediaEntity {
    pub media_id: String,
    pub version: i64,
    pub title: String,
    pub kind: MediaKind,
    pub author: Option<String>,
    pub available: bool,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl MediaEntity {
    pub fn new(title: &str, kind: MediaKind, author: Option<&str>) -> Self {
        Self {
            media_id: Uuid::new_v4().to_string(),
            version: 0,
            title: title.to_string(),
            kind,
            author: author.map(str::to_string),
            available: true,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl Identifiable for MediaEntity {
    fn id(&self) -> String {
        self.media_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}
