//! Issue ledger domain logic for the lab inventory tracker.
//!
//! This is the transaction core: issuing a component decrements its
//! available stock and appends a ledger record as one store transaction, and
//! returning restocks and flips the record exactly once. Either both sides
//! of an operation commit or neither does, which is what keeps
//! `total - available` equal to the sum of outstanding loan quantities.

use chrono::{DateTime, Utc};
use log::{info, warn};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::domain::commands::issues::{
    IssueComponentCommand, IssueListItem, IssueListQuery, IssueListResult, StatusFilter,
};
use crate::domain::errors::DomainError;
use crate::domain::models::issue::{ComponentIssue, IssueStatus};
use crate::domain::overdue;
use crate::storage::traits::{transact, InventoryStore};

/// Service for issuing components to students and recording returns.
#[derive(Clone)]
pub struct IssueService<S: InventoryStore> {
    store: Arc<S>,
}

impl<S: InventoryStore> IssueService<S> {
    /// Create a new IssueService
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Issue a component to a student.
    ///
    /// Decrements the component's available stock and appends the ledger
    /// record in one store transaction; a failed validation leaves the
    /// persisted state untouched.
    pub fn issue_component(
        &self,
        cmd: IssueComponentCommand,
    ) -> Result<ComponentIssue, DomainError> {
        info!(
            "Issuing component {} x{} to {} ({})",
            cmd.component_id, cmd.quantity, cmd.student_name, cmd.roll_no
        );

        if cmd.student_name.trim().is_empty() {
            return Err(DomainError::validation("student name cannot be empty"));
        }
        if cmd.roll_no.trim().is_empty() {
            return Err(DomainError::validation("roll number cannot be empty"));
        }
        if cmd.mobile.trim().is_empty() {
            return Err(DomainError::validation("mobile number cannot be empty"));
        }
        if cmd.purpose.trim().is_empty() {
            return Err(DomainError::validation("purpose cannot be empty"));
        }
        if cmd.quantity < 1 {
            return Err(DomainError::validation("quantity must be at least 1"));
        }

        let now = Utc::now();
        if cmd.due_date < now.date_naive() {
            return Err(DomainError::validation("due date cannot be in the past"));
        }

        let now_millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(anyhow::Error::from)?
            .as_millis() as u64;

        let issue = transact(self.store.as_ref(), |data| {
            let component = data
                .components
                .iter_mut()
                .find(|c| c.id == cmd.component_id)
                .ok_or_else(|| {
                    DomainError::not_found(format!("component not found: {}", cmd.component_id))
                })?;

            if cmd.quantity > component.available_quantity {
                return Err(DomainError::InsufficientStock {
                    requested: cmd.quantity,
                    available: component.available_quantity,
                });
            }

            component.available_quantity -= cmd.quantity;

            let issue = ComponentIssue {
                id: ComponentIssue::generate_id(now_millis),
                student_name: cmd.student_name.trim().to_string(),
                roll_no: cmd.roll_no.trim().to_string(),
                mobile: cmd.mobile.trim().to_string(),
                component_id: component.id.clone(),
                // Name snapshot; survives later renames of the component
                component_name: component.name.clone(),
                quantity: cmd.quantity,
                issue_date: now,
                due_date: cmd.due_date,
                status: IssueStatus::Issued,
                return_date: None,
                purpose: cmd.purpose.trim().to_string(),
                issued_by: cmd.issued_by.trim().to_string(),
            };
            data.component_issues.push(issue.clone());

            Ok(issue)
        })?;

        info!(
            "Issued {} x{} to {} as {}",
            issue.component_name, issue.quantity, issue.student_name, issue.id
        );
        Ok(issue)
    }

    /// Record the return of an issued component.
    ///
    /// Restocks the component and flips the record to Returned in one store
    /// transaction. Returns are a one-way transition: a second attempt on
    /// the same record fails and does not restock again.
    pub fn return_component(&self, issue_id: &str) -> Result<ComponentIssue, DomainError> {
        info!("Returning issue: {}", issue_id);

        let now = Utc::now();

        transact(self.store.as_ref(), |data| {
            let position = data
                .component_issues
                .iter()
                .position(|i| i.id == issue_id)
                .ok_or_else(|| DomainError::not_found(format!("issue not found: {}", issue_id)))?;

            if data.component_issues[position].status != IssueStatus::Issued {
                warn!("Issue {} was already returned", issue_id);
                return Err(DomainError::invalid_state("component already returned"));
            }

            let component_id = data.component_issues[position].component_id.clone();
            let quantity = data.component_issues[position].quantity;

            // The delete guard makes a missing component impossible; if the
            // store was tampered with, fail loudly rather than drop the
            // restock.
            let component = data
                .components
                .iter_mut()
                .find(|c| c.id == component_id)
                .ok_or_else(|| {
                    DomainError::invariant(format!(
                        "issued component missing from registry: {}",
                        component_id
                    ))
                })?;
            component.available_quantity += quantity;

            let issue = &mut data.component_issues[position];
            issue.status = IssueStatus::Returned;
            issue.return_date = Some(now);

            Ok(issue.clone())
        })
    }

    /// Read-only snapshot of the ledger, most recent issue first.
    pub fn get_component_issues(&self) -> Result<Vec<ComponentIssue>, DomainError> {
        let mut issues = self.store.load()?.component_issues;
        issues.sort_by(|a, b| b.issue_date.cmp(&a.issue_date));
        Ok(issues)
    }

    /// Filtered ledger listing with loan status computed against the current
    /// clock.
    pub fn list_issues(&self, query: IssueListQuery) -> Result<IssueListResult, DomainError> {
        self.list_issues_at(query, Utc::now())
    }

    /// Filtered ledger listing with loan status computed against `now`.
    pub fn list_issues_at(
        &self,
        query: IssueListQuery,
        now: DateTime<Utc>,
    ) -> Result<IssueListResult, DomainError> {
        let mut issues = self.store.load()?.component_issues;

        let term = query
            .search
            .as_deref()
            .unwrap_or_default()
            .trim()
            .to_lowercase();
        issues.retain(|issue| {
            let matches_search = term.is_empty()
                || issue.student_name.to_lowercase().contains(&term)
                || issue.roll_no.to_lowercase().contains(&term)
                || issue.component_name.to_lowercase().contains(&term);

            let matches_status = match query.status {
                StatusFilter::All => true,
                StatusFilter::Issued => issue.status == IssueStatus::Issued,
                StatusFilter::Returned => issue.status == IssueStatus::Returned,
            };

            matches_search && matches_status
        });

        issues.sort_by(|a, b| b.issue_date.cmp(&a.issue_date));

        let issues = issues
            .into_iter()
            .map(|issue| {
                let outstanding = issue.is_issued();
                IssueListItem {
                    days_remaining: outstanding
                        .then(|| overdue::days_remaining(issue.due_date, now)),
                    overdue: outstanding && overdue::is_overdue(issue.due_date, now),
                    issue,
                }
            })
            .collect();

        Ok(IssueListResult { issues })
    }
}
