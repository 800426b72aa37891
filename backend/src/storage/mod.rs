//! # Storage Module
//!
//! Handles data persistence for the lab inventory tracker.
//!
//! The domain layer only sees the [`traits::InventoryStore`] abstraction and
//! the [`traits::transact`] read-modify-write helper; the concrete backend
//! (currently a single JSON blob on disk) can be swapped without touching
//! the services.
//!
//! ## Design Principles
//!
//! - **Repository Pattern**: clean separation between domain and data access
//! - **Whole-store transactions**: every mutation rewrites the blob as one
//!   atomic unit, so the registry and the ledger can never drift apart on
//!   disk
//! - **Testability**: stores are constructed over arbitrary directories so
//!   tests can run against temp dirs

pub mod json;
pub mod traits;

pub use json::{JsonConnection, JsonInventoryStore};
pub use traits::{transact, InventoryData, InventoryStore};
