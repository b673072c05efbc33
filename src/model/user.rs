use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::leave_request::LeaveType;
use crate::model::role::Role;

/// Per-type allowance and consumption counters.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, ToSchema)]
pub struct LeaveBalance {
    pub used: u32,
    pub total: u32,
}

impl LeaveBalance {
    pub fn remaining(self) -> u32 {
        self.total.saturating_sub(self.used)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: u64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub name: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub leave_balances: BTreeMap<LeaveType, LeaveBalance>,
}

impl User {
    pub fn is_employee(&self) -> bool {
        self.role == Role::Employee
    }
}
