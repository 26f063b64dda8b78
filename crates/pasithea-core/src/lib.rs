//! pasithea-core: canonical issue store, agent tool contract, and replica
//! sync engine for a board operated jointly by a human and an AI agent.
//!
//! The canonical side is [`session::BoardSession`]: an explicitly owned
//! [`store::IssueStore`] mutated only through the [`tools`] registry, with
//! every mutation broadcast as a versioned, origin-tagged full-state
//! [`sync::Snapshot`]. The UI side is [`sync::BoardReplica`]: an optimistic
//! local copy that pushes its own edits, consumes their echoes exactly once,
//! and adopts genuine remote snapshots wholesale.
//!
//! # Conventions
//!
//! - **Errors**: domain and validation failures at the tool boundary are
//!   replies, never faults; module-level errors use `thiserror`;
//!   `anyhow::Result` with context where appropriate.
//! - **Logging**: `tracing` macros (`info!`, `warn!`, `debug!`).

pub mod config;
pub mod error;
pub mod model;
pub mod persist;
pub mod session;
pub mod store;
pub mod sync;
pub mod tools;
