use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::role::Role;
use crate::model::task::Task;

#[derive(Deserialize, ToSchema)]
pub struct LoginReqDto {
    #[schema(example = "admin@company.com")]
    pub email: String,
    #[schema(example = "admin123")]
    pub password: String,
}

/// The identity a session token carries: what a successful login writes
/// and logout discards. Capability checks live here so role logic is not
/// scattered across handlers.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionUser {
    pub id: u64,
    pub email: String,
    pub role: Role,
    pub name: String,
}

impl SessionUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Admin and finance both decide leave requests.
    pub fn is_approver(&self) -> bool {
        matches!(self.role, Role::Admin | Role::Finance)
    }

    /// Admin may touch any task; everyone else only their own.
    pub fn can_modify_task(&self, task: &Task) -> bool {
        self.is_admin() || task.assigned_to == self.id
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: u64,
    pub sub: String, // email
    pub name: String,
    pub role: u8, // role id
    pub exp: usize,
    pub jti: String,
}
