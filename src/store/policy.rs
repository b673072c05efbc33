use strum_macros::{Display, EnumString};

use crate::model::leave_request::LeaveStatus;
use crate::model::task::TaskStatus;

/// Pluggable status-transition rule shared by both lifecycles. `Free`
/// reproduces the reference behavior where any status may be reassigned
/// at will; `ForwardOnly` locks decided leaves and backward task moves.
/// Call sites never branch on the variant.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum TransitionPolicy {
    #[default]
    Free,
    ForwardOnly,
}

impl TransitionPolicy {
    pub fn allows_leave(self, from: LeaveStatus, to: LeaveStatus) -> bool {
        match self {
            TransitionPolicy::Free => true,
            // pending is the only non-terminal state
            TransitionPolicy::ForwardOnly => from == to || from == LeaveStatus::Pending,
        }
    }

    pub fn allows_task(self, from: TaskStatus, to: TaskStatus) -> bool {
        fn rank(status: TaskStatus) -> u8 {
            match status {
                TaskStatus::Pending => 0,
                TaskStatus::InProgress => 1,
                TaskStatus::Completed => 2,
            }
        }
        match self {
            TransitionPolicy::Free => true,
            TransitionPolicy::ForwardOnly => rank(from) <= rank(to),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_from_env_strings() {
        assert_eq!("free".parse::<TransitionPolicy>().unwrap(), TransitionPolicy::Free);
        assert_eq!(
            "forward-only".parse::<TransitionPolicy>().unwrap(),
            TransitionPolicy::ForwardOnly
        );
        assert!("strict".parse::<TransitionPolicy>().is_err());
    }

    #[test]
    fn free_policy_allows_everything() {
        let policy = TransitionPolicy::Free;
        assert!(policy.allows_leave(LeaveStatus::Approved, LeaveStatus::Rejected));
        assert!(policy.allows_task(TaskStatus::Completed, TaskStatus::Pending));
    }

    #[test]
    fn forward_only_locks_decided_leaves() {
        let policy = TransitionPolicy::ForwardOnly;
        assert!(policy.allows_leave(LeaveStatus::Pending, LeaveStatus::Approved));
        assert!(policy.allows_leave(LeaveStatus::Pending, LeaveStatus::Rejected));
        assert!(policy.allows_leave(LeaveStatus::Approved, LeaveStatus::Approved));
        assert!(!policy.allows_leave(LeaveStatus::Approved, LeaveStatus::Rejected));
        assert!(!policy.allows_leave(LeaveStatus::Rejected, LeaveStatus::Approved));
    }

    #[test]
    fn forward_only_rejects_backward_task_moves() {
        let policy = TransitionPolicy::ForwardOnly;
        assert!(policy.allows_task(TaskStatus::Pending, TaskStatus::InProgress));
        assert!(policy.allows_task(TaskStatus::Pending, TaskStatus::Completed));
        assert!(policy.allows_task(TaskStatus::InProgress, TaskStatus::Completed));
        assert!(!policy.allows_task(TaskStatus::Completed, TaskStatus::InProgress));
        assert!(!policy.allows_task(TaskStatus::InProgress, TaskStatus::Pending));
    }
}
