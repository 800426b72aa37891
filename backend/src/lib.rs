//! # Lab Inventory Backend
//!
//! Contains all non-UI logic for the lab inventory tracker: staff record
//! components, issue them to students, and track returns.
//!
//! The backend follows a layered architecture:
//! ```text
//! UI Layer (excluded from this crate)
//!     ↓
//! Domain Layer (services, commands, models)
//!     ↓
//! Storage Layer (store trait, JSON file backend)
//! ```
//!
//! The backend is UI-agnostic: it could back a desktop app, a CLI or an HTTP
//! layer without modification. The `shared` crate carries the DTO types that
//! cross that boundary.

pub mod domain;
pub mod storage;
