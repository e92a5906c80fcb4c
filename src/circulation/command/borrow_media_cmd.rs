use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::circulation::domain::CirculationService;
use crate::circulation::dto::LoanDto;
use crate::core::command::{require_librarian, Command, CommandError};
use crate::core::domain::Principal;

// Loans are recorded at the desk, so the borrowing member comes from the
// request body rather than from the caller principal.
pub(crate) struct BorrowMediaCommand {
    circulation_service: Box<dyn CirculationService>,
    principal: Principal,
}

impl BorrowMediaCommand {
    pub(crate) fn new(circulation_service: Box<dyn CirculationService>, principal: Principal) -> Self {
        Self {
            circulation_service,
            principal,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct BorrowMediaCommandRequest {
    member_id: String,
    media_id: String,
}

impl BorrowMediaCommandRequest {
    pub fn new(member_id: &str, media_id: &str) -> Self {
        Self {
            member_id: member_id.to_string(),
            media_id: media_id.to_string(),
        }
    }
}


#[derive(Debug, Serialize)]
pub(crate) struct BorrowMediaCommandResponse {
    loan: LoanDto,
}

impl BorrowMediaCommandResponse {
    pub fn new(loan: LoanDto) -> Self {
        Self {
            loan,
        }
    }
}

#[async_trait]
impl Command<BorrowMediaCommandRequest, BorrowMediaCommandResponse> for BorrowMediaCommand {
    async fn execute(&self, req: BorrowMediaCommandRequest) -> Result<BorrowMediaCommandResponse, CommandError> {
        require_librarian(&self.principal)?;
        self.circulation_service.borrow_media(req.member_id.as_str(), req.media_id.as_str())
            .await.map_err(CommandError::from).map(BorrowMediaCommandResponse::new)
    }
}
