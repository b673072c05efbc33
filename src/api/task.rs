use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::api::error::ApiError;
use crate::auth::auth::AuthUser;
use crate::model::task::{Task, TaskStatus};
use crate::store::error::StoreError;
use crate::store::task::TaskStore;
use crate::store::user::UserStore;
use crate::utils::query::{filter_data, sort_data};

const TASK_SEARCH_FIELDS: &[&str] = &["title", "description", "assigned_to_name"];

#[derive(Deserialize, ToSchema)]
pub struct CreateTask {
    #[schema(example = "Prepare Monthly Report")]
    pub title: String,
    #[schema(example = "Generate and review monthly performance report")]
    pub description: String,
    #[schema(example = 3)]
    pub assigned_to: u64,
    #[schema(example = "2024-01-20", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2024-01-25", format = "date", value_type = String)]
    pub deadline: NaiveDate,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateTaskStatus {
    #[schema(example = "in-progress")]
    pub status: TaskStatus,
}

#[derive(Deserialize, ToSchema)]
pub struct NewComment {
    #[schema(example = "Working on it, will complete by deadline")]
    pub text: String,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct TaskListQuery {
    /// Substring matched against title, description and assignee name
    pub search: Option<String>,
    #[param(example = "deadline")]
    /// Field to sort ascending by
    pub sort_by: Option<String>,
    #[param(example = "this-week")]
    /// Status token, "this-week", or "all"
    pub filter_by: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct TaskListResponse {
    pub data: Vec<Task>,
    #[schema(example = 3)]
    pub total: usize,
}

/* =========================
List tasks
========================= */
/// Admin sees every task; finance and employees only tasks assigned to
/// them.
#[utoipa::path(
    get,
    path = "/api/v1/tasks",
    params(TaskListQuery),
    responses(
        (status = 200, description = "Filtered, sorted task list", body = TaskListResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Task"
)]
pub async fn task_list(
    auth: AuthUser,
    tasks: web::Data<TaskStore>,
    query: web::Query<TaskListQuery>,
) -> Result<HttpResponse, ApiError> {
    let scope = if auth.user.is_admin() {
        tasks.list()
    } else {
        tasks.list_for(auth.user.id)
    };

    let filtered = filter_data(
        &scope,
        query.search.as_deref().unwrap_or(""),
        query.filter_by.as_deref().unwrap_or("all"),
        TASK_SEARCH_FIELDS,
    );
    let data = sort_data(&filtered, query.sort_by.as_deref().unwrap_or("deadline"));

    Ok(HttpResponse::Ok().json(TaskListResponse {
        total: data.len(),
        data,
    }))
}

/* =========================
Create task (Admin)
========================= */
/// Assign a new task. The assignee must be a known staff account.
#[utoipa::path(
    post,
    path = "/api/v1/tasks",
    request_body = CreateTask,
    responses(
        (status = 200, description = "Task created", body = Task),
        (status = 400, description = "Unknown assignee"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Task"
)]
pub async fn create_task(
    auth: AuthUser,
    tasks: web::Data<TaskStore>,
    users: web::Data<UserStore>,
    payload: web::Json<CreateTask>,
) -> Result<HttpResponse, ApiError> {
    auth.require_admin()?;

    let payload = payload.into_inner();
    let assignee = users
        .find(payload.assigned_to)
        .filter(|u| u.is_employee())
        .ok_or(StoreError::UnknownAssignee(payload.assigned_to))?;

    let task = tasks.create(
        payload.title,
        payload.description,
        &assignee,
        payload.start_date,
        payload.deadline,
    );

    info!(task_id = task.id, assigned_to = assignee.id, "Task created");

    Ok(HttpResponse::Ok().json(task))
}

/* =========================
Update task status
========================= */
/// Admin may move any task; everyone else only tasks assigned to them.
/// An unauthorized attempt is answered with 403 and changes nothing.
#[utoipa::path(
    put,
    path = "/api/v1/tasks/{task_id}/status",
    params(("task_id" = u64, Path, description = "ID of the task to update")),
    request_body = UpdateTaskStatus,
    responses(
        (status = 200, description = "Status updated", body = Task),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the assignee"),
        (status = 404, description = "Task not found"),
        (status = 409, description = "Transition not allowed by policy")
    ),
    security(("bearer_auth" = [])),
    tag = "Task"
)]
pub async fn update_task_status(
    auth: AuthUser,
    tasks: web::Data<TaskStore>,
    path: web::Path<u64>,
    payload: web::Json<UpdateTaskStatus>,
) -> Result<HttpResponse, ApiError> {
    let task_id = path.into_inner();
    let task = tasks.set_status(task_id, payload.status, &auth.user)?;

    info!(task_id, status = %task.status, actor = auth.user.id, "Task status updated");

    Ok(HttpResponse::Ok().json(task))
}

/* =========================
Comment on a task
========================= */
/// Append to the task's thread. Whitespace-only comments are rejected.
#[utoipa::path(
    post,
    path = "/api/v1/tasks/{task_id}/comments",
    params(("task_id" = u64, Path, description = "ID of the task to comment on")),
    request_body = NewComment,
    responses(
        (status = 200, description = "Comment added", body = Task),
        (status = 400, description = "Empty comment"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the assignee"),
        (status = 404, description = "Task not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Task"
)]
pub async fn add_comment(
    auth: AuthUser,
    tasks: web::Data<TaskStore>,
    path: web::Path<u64>,
    payload: web::Json<NewComment>,
) -> Result<HttpResponse, ApiError> {
    let task_id = path.into_inner();
    let task = tasks.append_comment(task_id, &payload.text, &auth.user)?;

    info!(task_id, actor = auth.user.id, "Comment added");

    Ok(HttpResponse::Ok().json(task))
}
