//! Shared world state for academic lifecycle BDD scenarios.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use lyceum::{
    clock::ManualClock,
    config::LedgerConfig,
    error::ErrorKind,
    identity::{
        adapters::memory::InMemoryUserRepository,
        domain::{AuthContext, Role, User},
        ports::UserRepository,
    },
    ledger::{
        adapters::{
            LedgerDependents,
            memory::{InMemoryExamResultRepository, InMemorySubmissionRepository},
        },
        services::SubmissionLedgerService,
    },
    task::{
        adapters::memory::InMemoryTaskRepository, domain::TaskId, services::TaskStoreService,
    },
};
use rstest::fixture;

/// Task store type used by the BDD world.
pub type TestTaskStore = TaskStoreService<
    InMemoryTaskRepository,
    LedgerDependents<InMemorySubmissionRepository, InMemoryExamResultRepository>,
    ManualClock,
>;

/// Ledger type used by the BDD world.
pub type TestLedger = SubmissionLedgerService<
    InMemoryTaskRepository,
    InMemoryUserRepository,
    InMemorySubmissionRepository,
    InMemoryExamResultRepository,
    ManualClock,
>;

/// Scenario world for academic lifecycle behaviour tests.
pub struct AcademicWorld {
    pub clock: ManualClock,
    pub users: Arc<InMemoryUserRepository>,
    pub tasks: Arc<InMemoryTaskRepository>,
    pub submissions: Arc<InMemorySubmissionRepository>,
    pub results: Arc<InMemoryExamResultRepository>,
    pub store: TestTaskStore,
    pub ledger: TestLedger,
    pub admin: Option<AuthContext>,
    pub student: Option<AuthContext>,
    pub current_task: Option<TaskId>,
    pub last_failure: Option<ErrorKind>,
}

impl AcademicWorld {
    /// Creates a world at the start of term with default ledger settings.
    #[must_use]
    pub fn new() -> Self {
        let clock = ManualClock::new(
            Utc.with_ymd_and_hms(2025, 3, 3, 9, 0, 0)
                .single()
                .unwrap_or_default(),
        );
        let users = Arc::new(InMemoryUserRepository::new());
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let submissions = Arc::new(InMemorySubmissionRepository::new());
        let results = Arc::new(InMemoryExamResultRepository::new());
        let shared_clock = Arc::new(clock.clone());

        Self {
            store: TaskStoreService::new(
                Arc::clone(&tasks),
                Arc::new(LedgerDependents::new(
                    Arc::clone(&submissions),
                    Arc::clone(&results),
                )),
                Arc::clone(&shared_clock),
            ),
            ledger: SubmissionLedgerService::new(
                Arc::clone(&tasks),
                Arc::clone(&users),
                Arc::clone(&submissions),
                Arc::clone(&results),
                shared_clock,
                LedgerConfig::default(),
            ),
            clock,
            users,
            tasks,
            submissions,
            results,
            admin: None,
            student: None,
            current_task: None,
            last_failure: None,
        }
    }

    /// Rebuilds the ledger over the same stores with new settings.
    pub fn reconfigure_ledger(&mut self, config: LedgerConfig) {
        self.ledger = SubmissionLedgerService::new(
            Arc::clone(&self.tasks),
            Arc::clone(&self.users),
            Arc::clone(&self.submissions),
            Arc::clone(&self.results),
            Arc::new(self.clock.clone()),
            config,
        );
    }

    /// Stores a user and returns their caller context.
    ///
    /// # Errors
    ///
    /// Returns an error when the user is invalid or cannot be stored.
    pub fn register(&self, name: &str, role: Role) -> Result<AuthContext, eyre::Report> {
        let email = format!("{}@lyceum.test", name.to_lowercase());
        let user = User::new(name, email, role, &self.clock)?;
        run_async(self.users.store(&user))?;
        Ok(AuthContext::new(user.id(), role))
    }

    /// Returns the registered admin.
    ///
    /// # Errors
    ///
    /// Returns an error when no admin was registered.
    pub fn admin(&self) -> Result<AuthContext, eyre::Report> {
        self.admin
            .ok_or_else(|| eyre::eyre!("missing admin in scenario world"))
    }

    /// Returns the registered student.
    ///
    /// # Errors
    ///
    /// Returns an error when no student was registered.
    pub fn student(&self) -> Result<AuthContext, eyre::Report> {
        self.student
            .ok_or_else(|| eyre::eyre!("missing student in scenario world"))
    }

    /// Returns the task the scenario is about.
    ///
    /// # Errors
    ///
    /// Returns an error when no task was created.
    pub fn current_task(&self) -> Result<TaskId, eyre::Report> {
        self.current_task
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }
}

impl Default for AcademicWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> AcademicWorld {
    AcademicWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
