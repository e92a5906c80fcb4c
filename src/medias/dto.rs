use chrono::{NaiveDateTime, Utc};
use uuid::Uuid;
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::core::library::MediaKind;
use crate::medias::Media;
use crate::utils::date::serializer;

// MediaDto is a data transfer object for the catalog service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct MediaDto {
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

impl MediaDto {
    pub fn new(title: &str, kind: MediaKind, author: Option<&str>) -> MediaDto {
        MediaDto {
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

impl Identifiable for MediaDto {
    fn id(&self) -> String {
        self.media_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

impl Media for MediaDto {
    fn kind(&self) -> MediaKind {
        self.kind
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn is_borrowable(&self) -> bool {
        self.kind.borrowable()
    }
}
