use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::api::error::ApiError;
use crate::auth::auth::AuthUser;
use crate::model::leave_request::{LeaveRequest, LeaveStatus, LeaveType};
use crate::store::leave::LeaveStore;
use crate::store::user::UserStore;
use crate::utils::query::{filter_data, sort_data};

const LEAVE_SEARCH_FIELDS: &[&str] = &["employee_name", "type", "reason"];

#[derive(Deserialize, ToSchema)]
pub struct CreateLeave {
    #[schema(example = "Vacation")]
    #[serde(rename = "type")]
    pub leave_type: LeaveType,
    #[schema(example = "2024-03-01", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2024-03-05", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[schema(example = "Family vacation")]
    pub reason: String,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct LeaveListQuery {
    /// Substring matched against employee name, leave type and reason
    pub search: Option<String>,
    #[param(example = "applied_date")]
    /// Field to sort ascending by
    pub sort_by: Option<String>,
    #[param(example = "Vacation")]
    /// Status or leave-type token, "this-week", or "all"
    pub filter_by: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct LeaveListResponse {
    pub data: Vec<LeaveRequest>,
    #[schema(example = 5)]
    pub total: usize,
}

/* =========================
List leave requests
========================= */
/// Admin and finance see every request; employees only their own. The
/// search/sort/filter query is applied server-side with the same
/// composition every list view uses.
#[utoipa::path(
    get,
    path = "/api/v1/leave",
    params(LeaveListQuery),
    responses(
        (status = 200, description = "Filtered, sorted leave list", body = LeaveListResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn leave_list(
    auth: AuthUser,
    leaves: web::Data<LeaveStore>,
    query: web::Query<LeaveListQuery>,
) -> Result<HttpResponse, ApiError> {
    let scope = if auth.user.is_approver() {
        leaves.list()
    } else {
        leaves.list_for(auth.user.id)
    };

    let filtered = filter_data(
        &scope,
        query.search.as_deref().unwrap_or(""),
        query.filter_by.as_deref().unwrap_or("all"),
        LEAVE_SEARCH_FIELDS,
    );
    let data = sort_data(&filtered, query.sort_by.as_deref().unwrap_or("applied_date"));

    Ok(HttpResponse::Ok().json(LeaveListResponse {
        total: data.len(),
        data,
    }))
}

/* =========================
Create leave request
========================= */
/// Submit a leave application for the signed-in user. The day count is
/// the inclusive span of the range; the request starts out pending.
#[utoipa::path(
    post,
    path = "/api/v1/leave",
    request_body = CreateLeave,
    responses(
        (status = 200, description = "Leave request submitted", body = LeaveRequest),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn create_leave(
    auth: AuthUser,
    leaves: web::Data<LeaveStore>,
    users: web::Data<UserStore>,
    payload: web::Json<CreateLeave>,
) -> Result<HttpResponse, ApiError> {
    let employee = users
        .find(auth.user.id)
        .ok_or(ApiError::NotFound("User not found".into()))?;

    let payload = payload.into_inner();
    let request = leaves.create(
        &employee,
        payload.leave_type,
        payload.start_date,
        payload.end_date,
        payload.reason,
    );

    info!(
        leave_id = request.id,
        employee_id = employee.id,
        "Leave request submitted"
    );

    Ok(HttpResponse::Ok().json(request))
}

/* =========================
Approve leave (Admin/Finance)
========================= */
#[utoipa::path(
    put,
    path = "/api/v1/leave/{leave_id}/approve",
    params(("leave_id" = u64, Path, description = "ID of the leave request to approve")),
    responses(
        (status = 200, description = "Leave approved", body = Object, example = json!({
            "message": "Leave approved"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Leave request not found"),
        (status = 409, description = "Transition not allowed by policy")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn approve_leave(
    auth: AuthUser,
    leaves: web::Data<LeaveStore>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    auth.require_approver()?;

    let leave_id = path.into_inner();
    let request = leaves.set_status(leave_id, LeaveStatus::Approved)?;

    info!(leave_id, approver = auth.user.id, "Leave approved");

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Leave approved",
        "status": request.status
    })))
}

/* =========================
Reject leave (Admin/Finance)
========================= */
#[utoipa::path(
    put,
    path = "/api/v1/leave/{leave_id}/reject",
    params(("leave_id" = u64, Path, description = "ID of the leave request to reject")),
    responses(
        (status = 200, description = "Leave rejected", body = Object, example = json!({
            "message": "Leave rejected"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Leave request not found"),
        (status = 409, description = "Transition not allowed by policy")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn reject_leave(
    auth: AuthUser,
    leaves: web::Data<LeaveStore>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    auth.require_approver()?;

    let leave_id = path.into_inner();
    let request = leaves.set_status(leave_id, LeaveStatus::Rejected)?;

    info!(leave_id, approver = auth.user.id, "Leave rejected");

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Leave rejected",
        "status": request.status
    })))
}
