//! Distinct facet values for building filters.

use crate::identity::domain::AuthContext;
use crate::task::ports::{TaskRepository, TaskRepositoryResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

/// Distinct subjects and stored status labels across all tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaFacets {
    /// Subjects, sorted.
    pub subjects: BTreeSet<String>,
    /// Stored status labels, sorted.
    pub statuses: BTreeSet<String>,
}

/// Computes [`MetaFacets`] on demand. Nothing is cached.
#[derive(Clone)]
pub struct MetaAggregator<R>
where
    R: TaskRepository,
{
    repository: Arc<R>,
}

impl<R> MetaAggregator<R>
where
    R: TaskRepository,
{
    /// Creates a new aggregator.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Returns the facets of the current task set.
    ///
    /// Status labels are the stored ones; `overdue` never appears.
    ///
    /// # Errors
    ///
    /// Returns the repository error when listing fails.
    pub async fn facets(&self, ctx: &AuthContext) -> TaskRepositoryResult<MetaFacets> {
        debug!(user_id = %ctx.user_id(), "computing task facets");
        let tasks = self.repository.list_all().await?;
        let mut facets = MetaFacets::default();
        for task in &tasks {
            facets.subjects.insert(task.subject().to_owned());
            facets
                .statuses
                .insert(task.stored_status().as_str().to_owned());
        }
        Ok(facets)
    }
}
