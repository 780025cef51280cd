//! Step definitions for academic lifecycle scenarios.

mod given;
mod then;
pub mod world;
