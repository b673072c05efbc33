use actix_web::{web, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::error::ApiError;
use crate::auth::auth::AuthUser;
use crate::model::leave_request::LeaveStatus;
use crate::store::leave::LeaveStore;
use crate::store::task::TaskStore;

#[derive(Serialize, ToSchema)]
pub struct StatsResponse {
    #[schema(example = 3)]
    pub pending_leaves: usize,
    #[schema(example = 2)]
    pub approved_leaves: usize,
    #[schema(example = 0)]
    pub rejected_leaves: usize,
    #[schema(example = 2)]
    pub assigned_tasks: usize,
}

/* =========================
Dashboard counters
========================= */
/// Header-card numbers for the dashboards, computed over the same scope
/// the list views show: approvers count all leave requests, employees
/// their own; admin counts every task, everyone else their assignments.
#[utoipa::path(
    get,
    path = "/api/v1/stats",
    responses(
        (status = 200, description = "Dashboard counters", body = StatsResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Stats"
)]
pub async fn dashboard_stats(
    auth: AuthUser,
    leaves: web::Data<LeaveStore>,
    tasks: web::Data<TaskStore>,
) -> Result<HttpResponse, ApiError> {
    let leave_scope = if auth.user.is_approver() {
        leaves.list()
    } else {
        leaves.list_for(auth.user.id)
    };
    let task_scope = if auth.user.is_admin() {
        tasks.list()
    } else {
        tasks.list_for(auth.user.id)
    };

    let count = |status: LeaveStatus| leave_scope.iter().filter(|r| r.status == status).count();

    Ok(HttpResponse::Ok().json(StatsResponse {
        pending_leaves: count(LeaveStatus::Pending),
        approved_leaves: count(LeaveStatus::Approved),
        rejected_leaves: count(LeaveStatus::Rejected),
        assigned_tasks: task_scope.len(),
    }))
}
