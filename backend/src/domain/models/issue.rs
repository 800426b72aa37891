//! Domain model for a component issue (loan) record.
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of an issue record.
///
/// The only legal transition is Issued -> Returned; Returned is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueStatus {
    Issued,
    Returned,
}

/// A ledger entry recording components issued to a student.
///
/// Entries are append-mostly: they are created at issue time, flipped to
/// Returned exactly once, and never deleted. `component_name` is a snapshot
/// taken at issue time and is intentionally not refreshed when the component
/// is renamed, so historical rows keep displaying the name the student
/// actually borrowed under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentIssue {
    pub id: String,
    pub student_name: String,
    pub roll_no: String,
    pub mobile: String,
    pub component_id: String,
    pub component_name: String,
    pub quantity: u32,
    pub issue_date: DateTime<Utc>,
    pub due_date: NaiveDate,
    pub status: IssueStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_date: Option<DateTime<Utc>>,
    pub purpose: String,
    pub issued_by: String,
}

impl ComponentIssue {
    /// Generate a unique issue ID based on the current timestamp.
    /// Format: issue-<timestamp_ms>-<random_suffix>
    pub fn generate_id(timestamp_ms: u64) -> String {
        let random_suffix = super::generate_random_suffix(4);
        format!("issue-{}-{}", timestamp_ms, random_suffix)
    }

    pub fn is_issued(&self) -> bool {
        self.status == IssueStatus::Issued
    }
}
