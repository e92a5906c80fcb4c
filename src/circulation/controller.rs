use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::Json,
};
use serde_json::Value;
use crate::circulation::command::borrow_media_cmd::{BorrowMediaCommand, BorrowMediaCommandRequest, BorrowMediaCommandResponse};
use crate::circulation::command::current_borrower_cmd::{CurrentBorrowerCommand, CurrentBorrowerCommandRequest, CurrentBorrowerCommandResponse};
use crate::circulation::command::list_overdue_cmd::{ListOverdueCommand, ListOverdueCommandRequest, ListOverdueCommandResponse};
use crate::circulation::command::return_media_cmd::{ReturnMediaCommand, ReturnMediaCommandRequest, ReturnMediaCommandResponse};
use crate::circulation::domain::CirculationService;
use crate::circulation::factory;
use crate::core::command::Command;
use crate::core::controller::{json_to_server_error, principal_from_headers, AppState, ServerError};

async fn build_service(state: &AppState) -> Box<dyn CirculationService> {
    factory::create_circulation_service(&state.config, state.store).await
}

pub(crate) async fn borrow_media(
    State(state): State<AppState>,
    headers: HeaderMap,
    json: Json<Value>) -> Result<Json<BorrowMediaCommandResponse>, ServerError> {
    let req: BorrowMediaCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let svc = build_service(&state).await;
    let res = BorrowMediaCommand::new(svc, principal_from_headers(&headers)).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn return_media(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(loan_id): Path<String>) -> Result<Json<ReturnMediaCommandResponse>, ServerError> {
    let req = ReturnMediaCommandRequest::new(loan_id.as_str());
    let svc = build_service(&state).await;
    let res = ReturnMediaCommand::new(svc, principal_from_headers(&headers)).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn find_current_borrower(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(media_id): Path<String>) -> Result<Json<CurrentBorrowerCommandResponse>, ServerError> {
    let req = CurrentBorrowerCommandRequest::new(media_id.as_str());
    let svc = build_service(&state).await;
    let res = CurrentBorrowerCommand::new(svc, principal_from_headers(&headers)).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn list_overdue(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(req): Query<ListOverdueCommandRequest>) -> Result<Json<ListOverdueCommandResponse>, ServerError> {
    let svc = build_service(&state).await;
    let res = ListOverdueCommand::new(svc, principal_from_headers(&headers)).execute(req).await?;
    Ok(Json(res))
}
