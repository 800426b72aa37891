//! Dashboard statistics for the lab inventory tracker.
//!
//! Counters are derived from a single store snapshot on every call and never
//! cached: the overdue count in particular depends on the clock.

use chrono::{DateTime, Utc};
use log::info;
use std::sync::Arc;

use crate::domain::commands::stats::InventoryStats;
use crate::domain::errors::DomainError;
use crate::domain::models::issue::IssueStatus;
use crate::domain::overdue;
use crate::storage::traits::InventoryStore;

/// Service computing read-only dashboard counters.
#[derive(Clone)]
pub struct StatsService<S: InventoryStore> {
    store: Arc<S>,
}

impl<S: InventoryStore> StatsService<S> {
    /// Create a new StatsService
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Compute the dashboard counters against the current clock.
    pub fn inventory_stats(&self) -> Result<InventoryStats, DomainError> {
        self.inventory_stats_at(Utc::now())
    }

    /// Compute the dashboard counters against `now`.
    pub fn inventory_stats_at(&self, now: DateTime<Utc>) -> Result<InventoryStats, DomainError> {
        let data = self.store.load()?;

        let issued_count = data
            .component_issues
            .iter()
            .filter(|i| i.status == IssueStatus::Issued)
            .count();
        let returned_count = data.component_issues.len() - issued_count;
        let overdue_count = data
            .component_issues
            .iter()
            .filter(|i| i.is_issued() && overdue::is_overdue(i.due_date, now))
            .count();

        let stats = InventoryStats {
            total_components: data.components.len(),
            units_on_loan: data.components.iter().map(|c| c.in_use() as u64).sum(),
            issued_count,
            returned_count,
            overdue_count,
        };

        info!(
            "Computed inventory stats: {} components, {} outstanding loans ({} overdue)",
            stats.total_components, stats.issued_count, stats.overdue_count
        );
        Ok(stats)
    }
}
