use chrono::{Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::domain::Identifiable;
use crate::core::library::LoanStatus;
use crate::utils::date::{opt_serializer, serializer};

// LoanEntity records one borrowing event: one member, one media, bounded
// period. loan_date is set once; returned_date is set exactly once, when the
// item comes back, and is the authoritative closure signal. due_date is a
// target only and never closes the loan.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct LoanEntity {
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

impl LoanEntity {
    pub fn new(branch_id: &str, member_id: &str, media_id: &str, loan_period_days: i64) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            loan_id: Uuid::new_v4().to_string(),
            version: 0,
            branch_id: branch_id.to_string(),
            media_id: media_id.to_string(),
            member_id: member_id.to_string(),
            loan_status: LoanStatus::Open,
            loan_date: now,
            due_date: now + Duration::days(loan_period_days),
            returned_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    // open = no effective return date yet
    pub fn is_open(&self) -> bool {
        self.returned_date.is_none()
    }

    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        self.is_open() && self.due_date < now
    }

    // Marks the physical return. No-op when already returned so the
    // operation stays idempotent.
    pub fn mark_returned(&mut self, now: NaiveDateTime) -> bool {
        if self.returned_date.is_some() {
            return false;
        }
        self.returned_date = Some(now);
        self.loan_status = LoanStatus::Returned;
        self.updated_at = now;
        true
    }
}

impl Identifiable for LoanEntity {
    fn id(&self) -> String {
        self.loan_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}
