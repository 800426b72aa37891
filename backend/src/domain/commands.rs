//! Domain-level command and query types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The presentation layer is responsible for
//! mapping the public DTOs defined in the `shared` crate to these internal
//! types.

pub mod components {
    /// Input for registering a new component.
    ///
    /// Stock starts fully available: `available_quantity = total_quantity`.
    #[derive(Debug, Clone)]
    pub struct AddComponentCommand {
        pub name: String,
        pub category: String,
        pub total_quantity: u32,
        pub description: Option<String>,
    }

    /// Input for editing an existing component.
    ///
    /// `None` fields are left unchanged. A `total_quantity` change shifts
    /// `available_quantity` by the same delta so the on-loan count stays
    /// constant across a pure capacity edit.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateComponentCommand {
        pub component_id: String,
        pub name: Option<String>,
        pub category: Option<String>,
        pub description: Option<String>,
        pub total_quantity: Option<u32>,
    }
}

pub mod issues {
    use chrono::NaiveDate;

    use crate::domain::models::issue::ComponentIssue;

    /// Input for issuing a component to a student.
    #[derive(Debug, Clone)]
    pub struct IssueComponentCommand {
        pub student_name: String,
        pub roll_no: String,
        pub mobile: String,
        pub component_id: String,
        pub quantity: u32,
        pub due_date: NaiveDate,
        pub purpose: String,
        pub issued_by: String,
    }

    /// Status facet for ledger queries.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum StatusFilter {
        #[default]
        All,
        Issued,
        Returned,
    }

    /// Query parameters for listing the issue ledger.
    ///
    /// `search` matches case-insensitively against student name, roll number
    /// and the component name snapshot; the status facet is ANDed on top.
    #[derive(Debug, Clone, Default)]
    pub struct IssueListQuery {
        pub search: Option<String>,
        pub status: StatusFilter,
    }

    /// A ledger row with its loan status computed at read time.
    #[derive(Debug, Clone)]
    pub struct IssueListItem {
        pub issue: ComponentIssue,
        /// Whole days until the due date for outstanding loans; 0 means due
        /// today, negative counts days overdue. `None` once returned.
        pub days_remaining: Option<i64>,
        pub overdue: bool,
    }

    /// Result of listing the issue ledger, most recent issue first.
    #[derive(Debug, Clone)]
    pub struct IssueListResult {
        pub issues: Vec<IssueListItem>,
    }
}

pub mod stats {
    /// Dashboard counters derived from the current snapshot.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct InventoryStats {
        pub total_components: usize,
        /// Total units currently out with students
        pub units_on_loan: u64,
        /// Issue records still outstanding
        pub issued_count: usize,
        /// Issue records already returned
        pub returned_count: usize,
        /// Outstanding issue records past their due date
        pub overdue_count: usize,
    }
}
