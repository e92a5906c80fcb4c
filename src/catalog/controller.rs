use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::Json,
};
use serde_json::Value;
use crate::catalog::command::add_media_cmd::{AddMediaCommand, AddMediaCommandRequest, AddMediaCommandResponse};
use crate::catalog::command::get_media_cmd::{GetMediaCommand, GetMediaCommandRequest, GetMediaCommandResponse};
use crate::catalog::command::list_medias_cmd::{ListMediasCommand, ListMediasCommandRequest, ListMediasCommandResponse};
use crate::catalog::domain::CatalogService;
use crate::catalog::factory;
use crate::core::command::Command;
use crate::core::controller::{json_to_server_error, principal_from_headers, AppState, ServerError};

async fn build_service(state: &AppState) -> Box<dyn CatalogService> {
    factory::create_catalog_service(&state.config, state.store).await
}

pub(crate) async fn add_media(
    State(state): State<AppState>,
    headers: HeaderMap,
    json: Json<Value>) -> Result<Json<AddMediaCommandResponse>, ServerError> {
    let req: AddMediaCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let svc = build_service(&state).await;
    let res = AddMediaCommand::new(svc, principal_from_headers(&headers)).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn find_media_by_id(
    State(state): State<AppState>,
    Path(media_id): Path<String>) -> Result<Json<GetMediaCommandResponse>, ServerError> {
    let req = GetMediaCommandRequest::new(media_id.as_str());
    let svc = build_service(&state).await;
    let res = GetMediaCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn list_medias(
    State(state): State<AppState>,
    Query(req): Query<ListMediasCommandRequest>) -> Result<Json<ListMediasCommandResponse>, ServerError> {
    let svc = build_service(&state).await;
    let res = ListMediasCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}
