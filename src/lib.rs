//! Lyceum: academic task lifecycle and authorization core.
//!
//! This crate governs how assignments and exams move through their states as
//! time passes and as users act on them, who may perform each mutation, and
//! how submissions and exam results attach to tasks.
//!
//! # Architecture
//!
//! Lyceum follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory stores, JWT)
//! - **Services**: Orchestration of domain rules over ports
//!
//! # Modules
//!
//! - [`identity`]: Credential resolution into a role-bearing context
//! - [`authorization`]: Role and ownership guards applied before mutation
//! - [`task`]: Assignment and exam store, status engine, and facets
//! - [`ledger`]: Submission and exam result recording
//! - [`enrollment`]: Course enrollment with duplicate rejection
//! - [`config`]: Layered configuration passed into components
//! - [`error`]: Error kind taxonomy shared by every service
//! - [`telemetry`]: Structured logging bootstrap
//! - [`clock`]: Settable clock for reproducing deadline behaviour

pub mod authorization;
pub mod clock;
pub mod config;
pub mod enrollment;
pub mod error;
pub mod identity;
pub mod ledger;
pub mod task;
pub mod telemetry;
