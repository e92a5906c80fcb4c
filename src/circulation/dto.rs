use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::core::library::LoanStatus;
use crate::utils::date::{opt_serializer, serializer};


// LoanDto abstracts one borrowing transaction for the presentation boundary.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct LoanDto {
    pub loan_id: String,
    pub version: i64,
    pub branch_id: String,
    pub media_id: String,
    pub member_id: String,
    pub loan_status: LoanStatus,
    #[serde(with = "serializer")]
    pub loan_date: NaiveDateTime,
    #[serde(with = "serializer")]
    pub due_date: NaiveDateTime,
    #[serde(with = "opt_serializer")]
    pub returned_date: Option<NaiveDateTime>,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl LoanDto {
    pub fn is_open(&self) -> bool {
        self.returned_date.is_none()
    }
}

impl Identifiable for LoanDto {
    fn id(&self) -> String {
        self.loan_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use crate::circulation::domain::model::LoanEntity;
    use crate::circulation::dto::LoanDto;
    use crate::core::library::LoanStatus;

    #[tokio::test]
    async fn test_should_build_loan_dto_from_entity() {
        let loan = LoanDto::from(&LoanEntity::new("branch1", "member1", "media1", 7));
        assert_eq!("media1", loan.media_id.as_str());
        assert_eq!(LoanStatus::Open, loan.loan_status);
        assert!(loan.is_open());
    }
}
