use crate::{
    api::models::*,
    core::{
        models::{expense::NewExpense, group::Group, member::MemberProfile, settlement::SettlementSummary},
        service::LedgerService,
    },
    infrastructure::{
        directory::in_memory::InMemoryDirectory, notify::in_memory::InMemoryNotifier,
        storage::in_memory::InMemoryStorage,
    },
};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

type AppService = Arc<LedgerService<InMemoryStorage, InMemoryDirectory, InMemoryNotifier>>;

#[derive(Serialize, ToSchema)]
pub struct GroupWithSettlement {
    pub group: Group,
    pub settlement: SettlementSummary,
}

// Define API routes
pub fn api_routes(service: AppService) -> Router {
    Router::new()
        .route("/", axum::routing::get(|| async { "OK" }))
        .route("/members", axum::routing::post(register_member))
        .route("/members/{member_id}/groups", axum::routing::get(list_member_groups))
        .route("/groups", axum::routing::post(create_group))
        .route("/groups/{group_id}", axum::routing::get(get_group))
        .route("/groups/{group_id}/expenses", axum::routing::post(add_expense))
        .route("/groups/{group_id}/finalize", axum::routing::post(finalize_group))
        .route("/groups/{group_id}/close", axum::routing::post(close_group))
        .route("/groups/{group_id}/settlement", axum::routing::post(get_settlement))
        .with_state(service)
}

#[utoipa::path(
    post,
    path = "/members",
    request_body = RegisterMemberRequest,
    responses(
        (status = 201, description = "Member registered in the directory")
    )
)]
pub async fn register_member(
    State(service): State<AppService>,
    Json(req): Json<RegisterMemberRequest>,
) -> StatusCode {
    service
        .directory()
        .register(MemberProfile {
            id: req.id,
            name: req.name,
            email: req.email,
        })
        .await;
    StatusCode::CREATED
}

#[utoipa::path(
    get,
    path = "/members/{member_id}/groups",
    params(("member_id" = String, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Groups the member belongs to", body = [Group]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_member_groups(
    State(service): State<AppService>,
    Path(member_id): Path<String>,
) -> Result<Json<Vec<Group>>, ApiError> {
    let groups = service.groups_for_member(&member_id).await?;
    Ok(Json(groups))
}

#[utoipa::path(
    post,
    path = "/groups",
    request_body = CreateGroupRequest,
    responses(
        (status = 201, description = "Group created", body = Group),
        (status = 400, description = "Invalid group", body = ErrorResponse)
    )
)]
pub async fn create_group(
    State(service): State<AppService>,
    Json(req): Json<CreateGroupRequest>,
) -> Result<(StatusCode, Json<Group>), ApiError> {
    let group = service.create_group(req.name, req.owner_id, req.member_ids).await?;
    Ok((StatusCode::CREATED, Json(group)))
}

#[utoipa::path(
    get,
    path = "/groups/{group_id}",
    params(("group_id" = String, Path, description = "Group ID")),
    responses(
        (status = 200, description = "Group found", body = Group),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn get_group(
    State(service): State<AppService>,
    Path(group_id): Path<String>,
) -> Result<Json<Group>, ApiError> {
    let group = service.get_group(&group_id).await?;
    Ok(Json(group))
}

#[utoipa::path(
    post,
    path = "/groups/{group_id}/expenses",
    params(("group_id" = String, Path, description = "Group ID")),
    request_body = AddExpenseRequest,
    responses(
        (status = 200, description = "Expense appended", body = Group),
        (status = 400, description = "Invalid expense", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse),
        (status = 409, description = "Group is not open", body = ErrorResponse)
    )
)]
pub async fn add_expense(
    State(service): State<AppService>,
    Path(group_id): Path<String>,
    Json(req): Json<AddExpenseRequest>,
) -> Result<Json<Group>, ApiError> {
    let proposed = NewExpense {
        payer_id: req.payer_id,
        description: req.description,
        amount_minor: req.amount_minor,
        splits: req.splits,
    };
    let group = service.add_expense(&group_id, proposed).await?;
    Ok(Json(group))
}

#[utoipa::path(
    post,
    path = "/groups/{group_id}/finalize",
    params(("group_id" = String, Path, description = "Group ID")),
    request_body = FinalizeGroupRequest,
    responses(
        (status = 200, description = "Group finalized", body = GroupWithSettlement),
        (status = 403, description = "Caller is not the owner", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse),
        (status = 409, description = "Group is not open", body = ErrorResponse)
    )
)]
pub async fn finalize_group(
    State(service): State<AppService>,
    Path(group_id): Path<String>,
    Json(req): Json<FinalizeGroupRequest>,
) -> Result<Json<GroupWithSettlement>, ApiError> {
    let (group, settlement) = service.finalize(&group_id, &req.caller_id).await?;
    Ok(Json(GroupWithSettlement { group, settlement }))
}

#[utoipa::path(
    post,
    path = "/groups/{group_id}/close",
    params(("group_id" = String, Path, description = "Group ID")),
    request_body = CloseGroupRequest,
    responses(
        (status = 200, description = "Group closed", body = GroupWithSettlement),
        (status = 403, description = "Caller is not the owner", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse),
        (status = 409, description = "Group is not finalized", body = ErrorResponse)
    )
)]
pub async fn close_group(
    State(service): State<AppService>,
    Path(group_id): Path<String>,
    Json(req): Json<CloseGroupRequest>,
) -> Result<Json<GroupWithSettlement>, ApiError> {
    let (group, settlement) = service.close(&group_id, &req.caller_id, req.chart_snapshot).await?;
    Ok(Json(GroupWithSettlement { group, settlement }))
}

#[utoipa::path(
    post,
    path = "/groups/{group_id}/settlement",
    params(("group_id" = String, Path, description = "Group ID")),
    request_body = GetSettlementRequest,
    responses(
        (status = 200, description = "Current settlement", body = SettlementSummary),
        (status = 403, description = "Caller is not a member", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn get_settlement(
    State(service): State<AppService>,
    Path(group_id): Path<String>,
    Json(req): Json<GetSettlementRequest>,
) -> Result<Json<SettlementSummary>, ApiError> {
    let settlement = service.settlement(&group_id, &req.caller_id).await?;
    Ok(Json(settlement))
}
