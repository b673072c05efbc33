use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::Result;
use chrono::{Local, NaiveDate};

use crate::model::leave_request::{inclusive_days, LeaveRequest, LeaveStatus, LeaveType};
use crate::model::user::User;
use crate::store::error::StoreError;
use crate::store::policy::TransitionPolicy;

/// Shared repository of leave requests. One dataset serves every view, so
/// a decision made on the approvals screen is the same record the
/// employee dashboard lists.
pub struct LeaveStore {
    requests: RwLock<Vec<LeaveRequest>>,
    policy: TransitionPolicy,
}

impl LeaveStore {
    pub fn new(policy: TransitionPolicy) -> Self {
        Self {
            requests: RwLock::new(Vec::new()),
            policy,
        }
    }

    pub fn seeded(policy: TransitionPolicy) -> Result<Self> {
        let seed = |id,
                    employee_id,
                    employee_name: &str,
                    leave_type,
                    start: &str,
                    end: &str,
                    reason: &str,
                    status,
                    applied: &str|
         -> Result<LeaveRequest> {
            let start_date: NaiveDate = start.parse()?;
            let end_date: NaiveDate = end.parse()?;
            Ok(LeaveRequest {
                id,
                employee_id,
                employee_name: employee_name.to_owned(),
                leave_type,
                start_date,
                end_date,
                days: inclusive_days(start_date, end_date),
                reason: reason.to_owned(),
                status,
                applied_date: applied.parse()?,
            })
        };

        let requests = vec![
            seed(1, 2, "John Doe", LeaveType::Sick, "2024-01-15", "2024-01-17", "Flu symptoms", LeaveStatus::Approved, "2024-01-10")?,
            seed(2, 2, "John Doe", LeaveType::Vacation, "2024-02-20", "2024-02-25", "Family vacation", LeaveStatus::Pending, "2024-02-15")?,
            seed(3, 3, "Jane Smith", LeaveType::Personal, "2024-01-25", "2024-01-25", "Personal appointment", LeaveStatus::Approved, "2024-01-20")?,
            seed(4, 4, "Mike Johnson", LeaveType::Vacation, "2024-03-10", "2024-03-15", "Annual vacation", LeaveStatus::Pending, "2024-02-25")?,
            seed(5, 3, "Jane Smith", LeaveType::Sick, "2024-04-05", "2024-04-06", "Migraine", LeaveStatus::Pending, "2024-04-04")?,
        ];

        Ok(Self {
            requests: RwLock::new(requests),
            policy,
        })
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<LeaveRequest>> {
        self.requests.read().expect("leave store lock poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<LeaveRequest>> {
        self.requests.write().expect("leave store lock poisoned")
    }

    pub fn list(&self) -> Vec<LeaveRequest> {
        self.read().clone()
    }

    pub fn list_for(&self, employee_id: u64) -> Vec<LeaveRequest> {
        self.read()
            .iter()
            .filter(|r| r.employee_id == employee_id)
            .cloned()
            .collect()
    }

    /// Append a new pending request for `employee`, applied today, with
    /// the inclusive day count computed from the range.
    pub fn create(
        &self,
        employee: &User,
        leave_type: LeaveType,
        start_date: NaiveDate,
        end_date: NaiveDate,
        reason: String,
    ) -> LeaveRequest {
        let mut requests = self.write();
        let id = requests.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let request = LeaveRequest {
            id,
            employee_id: employee.id,
            employee_name: employee.name.clone(),
            leave_type,
            start_date,
            end_date,
            days: inclusive_days(start_date, end_date),
            reason,
            status: LeaveStatus::Pending,
            applied_date: Local::now().date_naive(),
        };
        requests.push(request.clone());
        request
    }

    /// Approve or reject. Whether a decided request may be re-decided is
    /// the transition policy's call.
    pub fn set_status(&self, id: u64, status: LeaveStatus) -> Result<LeaveRequest, StoreError> {
        let mut requests = self.write();
        let request = requests
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound("Leave request"))?;

        if !self.policy.allows_leave(request.status, status) {
            return Err(StoreError::InvalidTransition {
                from: request.status.to_string(),
                to: status.to_string(),
            });
        }
        request.status = status;
        Ok(request.clone())
    }
}
