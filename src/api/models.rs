use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::errors::LedgerError;
use crate::core::models::expense::Split;

// Request structs for JSON payloads
#[derive(Deserialize, ToSchema)]
pub struct RegisterMemberRequest {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateGroupRequest {
    pub name: String,
    pub owner_id: String,
    pub member_ids: Vec<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct AddExpenseRequest {
    pub payer_id: String,
    pub description: String,
    pub amount_minor: i64,
    pub splits: Vec<Split>,
}

#[derive(Deserialize, ToSchema)]
pub struct FinalizeGroupRequest {
    pub caller_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct CloseGroupRequest {
    pub caller_id: String,
    pub chart_snapshot: Option<serde_json::Value>,
}

#[derive(Deserialize, ToSchema)]
pub struct GetSettlementRequest {
    pub caller_id: String,
}

// Error response struct
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

// Newtype wrapper for LedgerError to implement IntoResponse
pub struct ApiError(pub LedgerError);

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            LedgerError::EmptyGroupName
            | LedgerError::EmptyMemberList
            | LedgerError::EmptyDescription
            | LedgerError::NonPositiveAmount(_)
            | LedgerError::NegativeSplitAmount { .. }
            | LedgerError::SplitSumMismatch { .. }
            | LedgerError::DuplicateSplitMember(_)
            | LedgerError::PayerNotMember(_)
            | LedgerError::SplitMemberNotInGroup(_) => StatusCode::BAD_REQUEST,
            LedgerError::NotGroupMember(_) | LedgerError::NotGroupOwner(_) => StatusCode::FORBIDDEN,
            LedgerError::InvalidState { .. } => StatusCode::CONFLICT,
            LedgerError::GroupNotFound(_) => StatusCode::NOT_FOUND,
            LedgerError::StorageError(_)
            | LedgerError::DirectoryError(_)
            | LedgerError::NotificationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorResponse {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
