//! Application services for the task store and its derived views.

mod meta;
mod store;

pub use meta::{MetaAggregator, MetaFacets};
pub use store::{
    CreateTaskRequest, TaskStoreError, TaskStoreResult, TaskStoreService,
};
