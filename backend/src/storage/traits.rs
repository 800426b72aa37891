//! # Storage Traits
//!
//! This module defines the storage abstraction that allows different
//! storage backends to be used interchangeably in the domain layer.
//!
//! The whole inventory lives in a single persisted blob that is read,
//! modified and written back as a unit on every mutation. That keeps the
//! registry and the ledger consistent without cross-record coordination:
//! either the whole new state commits or nothing does.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::models::component::Component;
use crate::domain::models::issue::ComponentIssue;

/// The full persisted state: one record group per entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryData {
    #[serde(default)]
    pub components: Vec<Component>,
    #[serde(default, rename = "componentIssues")]
    pub component_issues: Vec<ComponentIssue>,
}

/// Trait defining the interface for the inventory store.
///
/// This trait abstracts away the specific storage implementation details,
/// allowing the domain layer to work with different storage backends
/// (JSON files, a database, etc.) without modification.
///
/// Note: all operations are synchronous for the single-actor desktop model.
pub trait InventoryStore: Send + Sync {
    /// Read the full store. A store that has never been written reads as
    /// empty, not as an error.
    fn load(&self) -> Result<InventoryData>;

    /// Replace the full store. Implementations must commit all-or-nothing:
    /// a failed save leaves the previously persisted state readable.
    fn save(&self, data: &InventoryData) -> Result<()>;
}

/// Scoped read-modify-write transaction over the store.
///
/// Loads a scratch copy, applies `apply` to it, and commits only if the
/// closure succeeds. A failed operation therefore never leaves a partial
/// write behind, and callers observe every service call as one atomic unit.
pub fn transact<S, T, E, F>(store: &S, apply: F) -> Result<T, E>
where
    S: InventoryStore + ?Sized,
    E: From<anyhow::Error>,
    F: FnOnce(&mut InventoryData) -> Result<T, E>,
{
    let mut data = store.load().map_err(E::from)?;
    let value = apply(&mut data)?;
    store.save(&data).map_err(E::from)?;
    Ok(value)
}
