use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::Json,
};
use serde_json::Value;
use crate::core::command::Command;
use crate::core::controller::{json_to_server_error, principal_from_headers, AppState, ServerError};
use crate::membership::command::add_member_cmd::{AddMemberCommand, AddMemberCommandRequest, AddMemberCommandResponse};
use crate::membership::command::block_member_cmd::{BlockMemberCommand, BlockMemberCommandRequest, BlockMemberCommandResponse};
use crate::membership::command::get_member_cmd::{GetMemberCommand, GetMemberCommandRequest, GetMemberCommandResponse};
use crate::membership::command::list_members_cmd::{ListMembersCommand, ListMembersCommandRequest, ListMembersCommandResponse};
use crate::membership::command::remove_member_cmd::{RemoveMemberCommand, RemoveMemberCommandRequest, RemoveMemberCommandResponse};
use crate::membership::command::update_member_cmd::{UpdateMemberCommand, UpdateMemberCommandRequest, UpdateMemberCommandResponse};
use crate::membership::domain::MemberService;
use crate::membership::factory;

async fn build_service(state: &AppState) -> Box<dyn MemberService> {
    factory::create_member_service(&state.config, state.store).await
}

pub(crate) async fn add_member(
    State(state): State<AppState>,
    headers: HeaderMap,
    json: Json<Value>) -> Result<Json<AddMemberCommandResponse>, ServerError> {
    let req: AddMemberCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let observer = factory::create_account_observer(&state.config, state.store).await;
    let res = AddMemberCommand::new(observer, principal_from_headers(&headers)).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn find_member_by_id(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(member_id): Path<String>) -> Result<Json<GetMemberCommandResponse>, ServerError> {
    let req = GetMemberCommandRequest::new(member_id.as_str());
    let svc = build_service(&state).await;
    let res = GetMemberCommand::new(svc, principal_from_headers(&headers)).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn update_member(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(member_id): Path<String>,
    json: Json<Value>) -> Result<Json<UpdateMemberCommandResponse>, ServerError> {
    let mut req: UpdateMemberCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    req.member_id = member_id;
    let svc = build_service(&state).await;
    let res = UpdateMemberCommand::new(svc, principal_from_headers(&headers)).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn remove_member(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(member_id): Path<String>) -> Result<Json<RemoveMemberCommandResponse>, ServerError> {
    let req = RemoveMemberCommandRequest::new(member_id.as_str());
    let svc = build_service(&state).await;
    let res = RemoveMemberCommand::new(svc, principal_from_headers(&headers)).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn block_member(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(member_id): Path<String>,
    json: Json<Value>) -> Result<Json<BlockMemberCommandResponse>, ServerError> {
    let mut req: BlockMemberCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    req.member_id = member_id;
    let svc = build_service(&state).await;
    let res = BlockMemberCommand::new(svc, principal_from_headers(&headers)).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn list_members(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(req): Query<ListMembersCommandRequest>) -> Result<Json<ListMembersCommandResponse>, ServerError> {
    let svc = build_service(&state).await;
    let res = ListMembersCommand::new(svc, principal_from_headers(&headers)).execute(req).await?;
    Ok(Json(res))
}
