//! Course enrollment for Lyceum.
//!
//! Admins create courses; any authenticated user may enroll in one, at most
//! once per course. An enrollment can be withdrawn by the enrolled user or
//! by an admin.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
