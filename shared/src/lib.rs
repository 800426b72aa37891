use serde::{Deserialize, Serialize};
use std::fmt;

/// A lab component as exposed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Component ID in format: "comp-<epoch_millis>-<suffix>"
    pub id: String,
    pub name: String,
    /// Free-form category label (e.g. "Microcontroller", "Sensor")
    pub category: String,
    /// Units owned by the lab
    pub total_quantity: u32,
    /// Units currently on the shelf
    pub available_quantity: u32,
    /// Units currently out with students
    pub in_use: u32,
    pub description: Option<String>,
}

/// Lifecycle state of an issue record.
///
/// The only transition is Issued -> Returned; Returned is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueStatus {
    Issued,
    Returned,
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueStatus::Issued => write!(f, "issued"),
            IssueStatus::Returned => write!(f, "returned"),
        }
    }
}

/// A ledger entry recording components issued to a student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentIssue {
    /// Issue ID in format: "issue-<epoch_millis>-<suffix>"
    pub id: String,
    pub student_name: String,
    pub roll_no: String,
    pub mobile: String,
    /// ID of the component this entry references
    pub component_id: String,
    /// Component name as it was at issue time (kept even if the component is
    /// later renamed)
    pub component_name: String,
    pub quantity: u32,
    /// Timestamp the issue was recorded (RFC 3339)
    pub issue_date: String,
    /// Agreed return date (YYYY-MM-DD)
    pub due_date: String,
    pub status: IssueStatus,
    /// Timestamp the return was recorded (RFC 3339), once returned
    pub return_date: Option<String>,
    /// Project/lab purpose stated by the student
    pub purpose: String,
    /// Staff member who recorded the issue
    pub issued_by: String,
}

/// Dashboard counters derived from the current inventory snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryStats {
    pub total_components: usize,
    /// Total units currently out with students
    pub units_on_loan: u64,
    /// Number of issue records still outstanding
    pub issued_count: usize,
    /// Number of issue records already returned
    pub returned_count: usize,
    /// Outstanding issue records past their due date
    pub overdue_count: usize,
}

/// Which tabular report to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportReport {
    /// Current component registry with stock levels
    Inventory,
    /// Full issue ledger, including returned records
    IssuedComponents,
}

/// Response carrying a generated CSV report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDataResponse {
    pub csv_content: String,
    /// Suggested filename, stamped with the export date
    pub filename: String,
    /// Number of data rows (excluding the header)
    pub row_count: usize,
}

/// Request to write a report to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportToPathRequest {
    pub report: ExportReport,
    /// Target directory; defaults to the user's Documents folder when absent
    pub custom_path: Option<String>,
}

/// Outcome of writing a report to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportToPathResponse {
    pub success: bool,
    pub message: String,
    pub file_path: String,
    pub row_count: usize,
}
