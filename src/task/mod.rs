//! Task store and status engine for Lyceum.
//!
//! A task is either an assignment (due at a point in time, completed by a
//! student) or an exam (scheduled with a duration). Admins create, patch,
//! and delete tasks; students may only toggle assignment completion. The
//! status reported to readers is recomputed from stored fields and the
//! current time on every read, so an unfinished assignment past its due
//! date always reads as overdue. The module follows hexagonal architecture:
//!
//! - Domain types and the status engine in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
