//! # Domain Module
//!
//! Business logic for the lab inventory tracker.
//!
//! ## Key Responsibilities
//!
//! - **Component Registry**: recording components and their stock levels
//! - **Issue Ledger**: issuing components to students and recording returns
//! - **Overdue Tracking**: deriving due-date status at read time
//! - **Statistics**: dashboard counters computed from the current snapshot
//! - **Export**: CSV reports built from read-only snapshots
//!
//! ## Business Rules
//!
//! - `available_quantity` never exceeds `total_quantity`, and the difference
//!   always equals the units recorded as out on outstanding issue records
//! - Issuing decrements stock and appends the ledger record as one unit;
//!   returning restocks and flips the record exactly once
//! - Issue records are never deleted, and keep a component-name snapshot so
//!   history survives renames and deletions
//! - Overdue status is recomputed on every read, never stored
//!
//! ## Design Principles
//!
//! - **Single Responsibility**: each service has a focused purpose
//! - **Storage Agnostic**: services work through the storage traits
//! - **UI Agnostic**: business logic separate from presentation concerns

pub mod commands;
pub mod component_service;
pub mod errors;
pub mod export_service;
pub mod issue_service;
pub mod models;
pub mod overdue;
pub mod stats_service;

pub use commands::*;
pub use component_service::*;
pub use errors::*;
pub use export_service::*;
pub use issue_service::*;
pub use stats_service::*;
