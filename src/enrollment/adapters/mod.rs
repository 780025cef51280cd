//! Adapter implementations for enrollment ports.

pub mod memory;
