use crate::api::leave::{CreateLeave, LeaveListQuery, LeaveListResponse};
use crate::api::stats::StatsResponse;
use crate::api::task::{CreateTask, NewComment, TaskListQuery, TaskListResponse, UpdateTaskStatus};
use crate::api::user::{UpdateAllowances, UserResponse};
use crate::auth::handlers::LoginResponse;
use crate::model::leave_request::{LeaveRequest, LeaveStatus, LeaveType};
use crate::model::role::Role;
use crate::model::task::{Comment, Task, TaskStatus};
use crate::model::user::LeaveBalance;
use crate::models::{LoginReqDto, SessionUser};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{openapi, Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Employee Management System API",
        version = "1.0.0",
        description = r#"
## Employee Management System (EMS)

Role-based employee management: leave requests, task assignment, and
leave-balance administration over shared in-memory data.

### 🔹 Key Features
- **Leave Management**
  - Apply for leave, approve/reject requests, and browse leave history
- **Task Management**
  - Assign tasks, track status, and discuss in per-task comment threads
- **User Management**
  - View accounts and edit per-type leave allowances
- **Dashboards**
  - Role-scoped counters and searchable, sortable, filterable lists

### 🔐 Security
Endpoints under `/api/v1` require **JWT Bearer authentication**. Admin
and finance roles unlock the approval and management operations.

### 📦 Response Format
- JSON-based RESTful responses
- Every list endpoint accepts `search`, `sort_by` and `filter_by`

All data is seeded in memory at startup and reset on restart.

---
Built with **Rust**, **Actix Web**, and **Utoipa**.
"#,
    ),
    paths(
        crate::auth::handlers::login,
        crate::auth::handlers::logout,
        crate::auth::handlers::session,

        crate::api::leave::leave_list,
        crate::api::leave::create_leave,
        crate::api::leave::approve_leave,
        crate::api::leave::reject_leave,

        crate::api::task::task_list,
        crate::api::task::create_task,
        crate::api::task::update_task_status,
        crate::api::task::add_comment,

        crate::api::user::list_users,
        crate::api::user::update_allowances,
        crate::api::user::my_balance,

        crate::api::stats::dashboard_stats
    ),
    components(
        schemas(
            LoginReqDto,
            LoginResponse,
            SessionUser,
            Role,
            LeaveType,
            LeaveStatus,
            LeaveRequest,
            LeaveListQuery,
            LeaveListResponse,
            CreateLeave,
            TaskStatus,
            Comment,
            Task,
            TaskListQuery,
            TaskListResponse,
            CreateTask,
            UpdateTaskStatus,
            NewComment,
            UserResponse,
            UpdateAllowances,
            LeaveBalance,
            StatsResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Session management APIs"),
        (name = "Leave", description = "Leave management APIs"),
        (name = "Task", description = "Task management APIs"),
        (name = "User", description = "User and allowance management APIs"),
        (name = "Stats", description = "Dashboard counter APIs"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
