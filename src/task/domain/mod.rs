//! Domain model for the task lifecycle.
//!
//! The task domain models assignment and exam records, the role-selected
//! patch policy, and the pure status engine, keeping all infrastructure
//! concerns outside the domain boundary.

mod error;
mod ids;
mod patch;
pub mod status;
mod task;
mod view;

pub use error::{ParsePriorityError, ParseTaskStatusError, TaskDomainError};
pub use ids::TaskId;
pub use patch::{PatchPolicy, TaskPatch, parse_schedule_time};
pub use status::{TaskStatus, days_left, effective_status};
pub use task::{NewTask, Priority, Task, TaskKind, TaskSchedule};
pub use view::{DueWindow, TaskQuery, TaskSummary, TaskView};
