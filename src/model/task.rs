use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Comment {
    pub id: u64,
    pub author: String,
    pub text: String,
    #[schema(example = "2024-01-16", format = "date", value_type = String)]
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub assigned_to: u64,
    pub assigned_to_name: String,
    #[schema(example = "2024-01-15", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2024-01-30", format = "date", value_type = String)]
    pub deadline: NaiveDate,
    pub status: TaskStatus,
    pub comments: Vec<Comment>,
}

impl Task {
    /// Next comment id for this task's thread.
    pub fn next_comment_id(&self) -> u64 {
        self.comments.iter().map(|c| c.id).max().unwrap_or(0) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_strings() {
        assert_eq!(TaskStatus::InProgress.to_string(), "in-progress");
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"in-progress\""
        );
        assert_eq!("completed".parse::<TaskStatus>().unwrap(), TaskStatus::Completed);
    }

    #[test]
    fn comment_ids_are_sequential_per_task() {
        let mut task = Task {
            id: 1,
            title: "t".into(),
            description: "d".into(),
            assigned_to: 2,
            assigned_to_name: "John Doe".into(),
            start_date: "2024-01-15".parse().unwrap(),
            deadline: "2024-01-30".parse().unwrap(),
            status: TaskStatus::Pending,
            comments: vec![],
        };
        assert_eq!(task.next_comment_id(), 1);
        task.comments.push(Comment {
            id: task.next_comment_id(),
            author: "Admin".into(),
            text: "first".into(),
            date: "2024-01-16".parse().unwrap(),
        });
        assert_eq!(task.next_comment_id(), 2);
    }
}
