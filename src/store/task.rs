use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::Result;
use chrono::{Local, NaiveDate};

use crate::model::task::{Comment, Task, TaskStatus};
use crate::model::user::User;
use crate::models::SessionUser;
use crate::store::error::StoreError;
use crate::store::policy::TransitionPolicy;

/// Shared repository of assigned tasks and their comment threads.
pub struct TaskStore {
    tasks: RwLock<Vec<Task>>,
    policy: TransitionPolicy,
}

impl TaskStore {
    pub fn new(policy: TransitionPolicy) -> Self {
        Self {
            tasks: RwLock::new(Vec::new()),
            policy,
        }
    }

    pub fn seeded(policy: TransitionPolicy) -> Result<Self> {
        let comment = |id, author: &str, text: &str, date: &str| -> Result<Comment> {
            Ok(Comment {
                id,
                author: author.to_owned(),
                text: text.to_owned(),
                date: date.parse()?,
            })
        };
        let seed = |id,
                    title: &str,
                    description: &str,
                    assigned_to,
                    assigned_to_name: &str,
                    start: &str,
                    deadline: &str,
                    status,
                    comments|
         -> Result<Task> {
            Ok(Task {
                id,
                title: title.to_owned(),
                description: description.to_owned(),
                assigned_to,
                assigned_to_name: assigned_to_name.to_owned(),
                start_date: start.parse()?,
                deadline: deadline.parse()?,
                status,
                comments,
            })
        };

        let tasks = vec![
            seed(
                1,
                "Update Employee Database",
                "Migrate employee records to new system",
                2,
                "John Doe",
                "2024-01-15",
                "2024-01-30",
                TaskStatus::InProgress,
                vec![
                    comment(1, "Admin User", "Please prioritize this task", "2024-01-16")?,
                    comment(2, "John Doe", "Working on it, will complete by deadline", "2024-01-17")?,
                ],
            )?,
            seed(
                2,
                "Prepare Monthly Report",
                "Generate and review monthly performance report",
                3,
                "Jane Smith",
                "2024-01-20",
                "2024-01-25",
                TaskStatus::Pending,
                vec![],
            )?,
            seed(
                3,
                "System Maintenance",
                "Perform routine system maintenance and updates",
                2,
                "John Doe",
                "2024-01-10",
                "2024-01-15",
                TaskStatus::Completed,
                vec![comment(1, "John Doe", "Maintenance completed successfully", "2024-01-14")?],
            )?,
        ];

        Ok(Self {
            tasks: RwLock::new(tasks),
            policy,
        })
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Task>> {
        self.tasks.read().expect("task store lock poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Task>> {
        self.tasks.write().expect("task store lock poisoned")
    }

    pub fn list(&self) -> Vec<Task> {
        self.read().clone()
    }

    pub fn list_for(&self, employee_id: u64) -> Vec<Task> {
        self.read()
            .iter()
            .filter(|t| t.assigned_to == employee_id)
            .cloned()
            .collect()
    }

    /// New pending task for a validated assignee. The caller resolves the
    /// assignee against the user directory first.
    pub fn create(
        &self,
        title: String,
        description: String,
        assignee: &User,
        start_date: NaiveDate,
        deadline: NaiveDate,
    ) -> Task {
        let mut tasks = self.write();
        let id = tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let task = Task {
            id,
            title,
            description,
            assigned_to: assignee.id,
            assigned_to_name: assignee.name.clone(),
            start_date,
            deadline,
            status: TaskStatus::Pending,
            comments: Vec::new(),
        };
        tasks.push(task.clone());
        task
    }

    pub fn set_status(
        &self,
        id: u64,
        status: TaskStatus,
        actor: &SessionUser,
    ) -> Result<Task, StoreError> {
        let mut tasks = self.write();
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound("Task"))?;

        if !actor.can_modify_task(task) {
            return Err(StoreError::PermissionDenied);
        }
        if !self.policy.allows_task(task.status, status) {
            return Err(StoreError::InvalidTransition {
                from: task.status.to_string(),
                to: status.to_string(),
            });
        }
        task.status = status;
        Ok(task.clone())
    }

    /// Append to the task's thread. Whitespace-only text is rejected
    /// before any lookup side effects.
    pub fn append_comment(
        &self,
        id: u64,
        text: &str,
        actor: &SessionUser,
    ) -> Result<Task, StoreError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(StoreError::EmptyComment);
        }

        let mut tasks = self.write();
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound("Task"))?;

        if !actor.can_modify_task(task) {
            return Err(StoreError::PermissionDenied);
        }

        task.comments.push(Comment {
            id: task.next_comment_id(),
            author: actor.name.clone(),
            text: text.to_owned(),
            date: Local::now().date_naive(),
        });
        Ok(task.clone())
    }
}
