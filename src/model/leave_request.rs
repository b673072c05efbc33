use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    ToSchema,
)]
pub enum LeaveType {
    #[serde(rename = "Sick Leave")]
    #[strum(serialize = "Sick Leave")]
    Sick,
    #[serde(rename = "Vacation")]
    #[strum(serialize = "Vacation")]
    Vacation,
    #[serde(rename = "Personal Leave")]
    #[strum(serialize = "Personal Leave")]
    Personal,
}

impl LeaveType {
    pub const ALL: [LeaveType; 3] = [LeaveType::Sick, LeaveType::Vacation, LeaveType::Personal];
}

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LeaveRequest {
    pub id: u64,
    pub employee_id: u64,
    pub employee_name: String,
    #[serde(rename = "type")]
    pub leave_type: LeaveType,
    #[schema(example = "2024-01-20", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2024-01-22", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    pub days: u32,
    pub reason: String,
    pub status: LeaveStatus,
    #[schema(example = "2024-01-18", format = "date", value_type = String)]
    pub applied_date: NaiveDate,
}

/// Inclusive day count between two dates, direction-insensitive.
pub fn inclusive_days(start: NaiveDate, end: NaiveDate) -> u32 {
    (end - start).num_days().unsigned_abs() as u32 + 1
}
