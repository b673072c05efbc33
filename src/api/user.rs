use std::collections::BTreeMap;

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::api::error::ApiError;
use crate::auth::auth::AuthUser;
use crate::model::leave_request::LeaveType;
use crate::model::role::Role;
use crate::model::user::{LeaveBalance, User};
use crate::store::user::UserStore;

#[derive(Serialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = 2)]
    pub id: u64,
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "john@company.com")]
    pub email: String,
    pub role: Role,
    #[schema(value_type = Object, example = json!({
        "Sick Leave": { "used": 3, "total": 10 },
        "Vacation": { "used": 6, "total": 20 },
        "Personal Leave": { "used": 2, "total": 5 }
    }))]
    pub leave_balances: BTreeMap<String, LeaveBalance>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            leave_balances: user
                .leave_balances
                .into_iter()
                .map(|(leave_type, balance)| (leave_type.to_string(), balance))
                .collect(),
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateAllowances {
    /// New allowance totals per leave type; `used` counters are kept.
    #[schema(value_type = Object, example = json!({
        "Sick Leave": 10,
        "Vacation": 20,
        "Personal Leave": 5
    }))]
    pub allowances: BTreeMap<LeaveType, u32>,
}

/* =========================
List users (Admin)
========================= */
/// The user-management view: accounts with their leave balances.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Accounts with balances", body = [UserResponse]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "User"
)]
pub async fn list_users(
    auth: AuthUser,
    users: web::Data<UserStore>,
) -> Result<HttpResponse, ApiError> {
    auth.require_admin()?;

    let data: Vec<UserResponse> = users.list().into_iter().map(UserResponse::from).collect();
    Ok(HttpResponse::Ok().json(data))
}

/* =========================
Edit leave allowances (Admin)
========================= */
#[utoipa::path(
    put,
    path = "/api/v1/users/{user_id}/allowances",
    params(("user_id" = u64, Path, description = "Account to update")),
    request_body = UpdateAllowances,
    responses(
        (status = 200, description = "Allowances updated", body = UserResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = [])),
    tag = "User"
)]
pub async fn update_allowances(
    auth: AuthUser,
    users: web::Data<UserStore>,
    path: web::Path<u64>,
    payload: web::Json<UpdateAllowances>,
) -> Result<HttpResponse, ApiError> {
    auth.require_admin()?;

    let user_id = path.into_inner();
    let user = users.set_allowances(user_id, &payload.allowances)?;

    info!(user_id, editor = auth.user.id, "Leave allowances updated");

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/* =========================
Own leave balance
========================= */
/// The signed-in user's per-type allowance and consumption counters.
#[utoipa::path(
    get,
    path = "/api/v1/balance",
    responses(
        (status = 200, description = "Own balances", body = Object, example = json!({
            "Sick Leave": { "used": 3, "total": 10 },
            "Vacation": { "used": 6, "total": 20 },
            "Personal Leave": { "used": 2, "total": 5 }
        })),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = [])),
    tag = "User"
)]
pub async fn my_balance(
    auth: AuthUser,
    users: web::Data<UserStore>,
) -> Result<HttpResponse, ApiError> {
    let user = users
        .find(auth.user.id)
        .ok_or(ApiError::NotFound("User not found".into()))?;

    let balances: BTreeMap<String, LeaveBalance> = user
        .leave_balances
        .into_iter()
        .map(|(leave_type, balance)| (leave_type.to_string(), balance))
        .collect();

    Ok(HttpResponse::Ok().json(balances))
}
