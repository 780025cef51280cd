//! Shared wiring for in-memory integration tests.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use lyceum::{
    clock::ManualClock,
    config::{AuthConfig, LedgerConfig},
    enrollment::{
        adapters::memory::{InMemoryCourseRepository, InMemoryEnrollmentRepository},
        services::EnrollmentService,
    },
    identity::{
        adapters::{JwtCredentialVerifier, TokenIssuer, memory::InMemoryUserRepository},
        domain::AuthContext,
        services::{IdentityService, RegisterUserRequest},
    },
    ledger::{
        adapters::{
            LedgerDependents,
            memory::{InMemoryExamResultRepository, InMemorySubmissionRepository},
        },
        services::SubmissionLedgerService,
    },
    task::{
        adapters::memory::InMemoryTaskRepository,
        services::{MetaAggregator, TaskStoreService},
    },
};
use mockable::DefaultClock;

/// Signing secret shared by issuer and verifier.
pub const SECRET: &str = "integration-secret-with-at-least-32-bytes";

/// Identity service over in-memory users.
pub type Identity = IdentityService<InMemoryUserRepository, JwtCredentialVerifier, ManualClock>;

/// Purge hook wired to the in-memory ledger stores.
pub type Dependents = LedgerDependents<InMemorySubmissionRepository, InMemoryExamResultRepository>;

/// Task store over in-memory tasks, purging the in-memory ledger.
pub type Tasks = TaskStoreService<InMemoryTaskRepository, Dependents, ManualClock>;

/// Ledger over in-memory stores.
pub type Ledger = SubmissionLedgerService<
    InMemoryTaskRepository,
    InMemoryUserRepository,
    InMemorySubmissionRepository,
    InMemoryExamResultRepository,
    ManualClock,
>;

/// Enrollment over in-memory stores.
pub type Enrollments = EnrollmentService<
    InMemoryCourseRepository,
    InMemoryEnrollmentRepository,
    InMemoryUserRepository,
    ManualClock,
>;

/// Every service wired over one set of in-memory stores.
pub struct Campus {
    pub identity: Identity,
    pub tasks: Tasks,
    pub ledger: Ledger,
    pub enrollments: Enrollments,
    pub meta: MetaAggregator<InMemoryTaskRepository>,
    pub issuer: TokenIssuer,
    pub clock: ManualClock,
}

/// Instant the campus clock starts at.
#[must_use]
pub fn term_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 3, 9, 0, 0)
        .single()
        .unwrap_or_default()
}

impl Campus {
    /// Builds a campus with the given ledger settings.
    ///
    /// # Errors
    ///
    /// Returns an error when the auth configuration is rejected.
    pub fn with_ledger(ledger_config: LedgerConfig) -> Result<Self, eyre::Report> {
        let auth = AuthConfig::with_secret(SECRET);
        let clock = ManualClock::new(term_start());
        let shared_clock = Arc::new(clock.clone());
        let users = Arc::new(InMemoryUserRepository::new());
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let submissions = Arc::new(InMemorySubmissionRepository::new());
        let results = Arc::new(InMemoryExamResultRepository::new());
        let dependents = LedgerDependents::new(Arc::clone(&submissions), Arc::clone(&results));

        Ok(Self {
            identity: IdentityService::new(
                Arc::clone(&users),
                Arc::new(JwtCredentialVerifier::new(&auth)?),
                Arc::clone(&shared_clock),
            ),
            tasks: TaskStoreService::new(
                Arc::clone(&tasks),
                Arc::new(dependents),
                Arc::clone(&shared_clock),
            ),
            ledger: SubmissionLedgerService::new(
                Arc::clone(&tasks),
                Arc::clone(&users),
                submissions,
                results,
                Arc::clone(&shared_clock),
                ledger_config,
            ),
            enrollments: EnrollmentService::new(
                Arc::new(InMemoryCourseRepository::new()),
                Arc::new(InMemoryEnrollmentRepository::new()),
                users,
                shared_clock,
            ),
            meta: MetaAggregator::new(tasks),
            issuer: TokenIssuer::new(&auth)?,
            clock,
        })
    }

    /// Builds a campus with default ledger settings.
    ///
    /// # Errors
    ///
    /// Returns an error when the auth configuration is rejected.
    pub fn new() -> Result<Self, eyre::Report> {
        Self::with_ledger(LedgerConfig::default())
    }

    /// Registers a user and returns the bearer header for their token.
    ///
    /// Tokens are stamped with the wall clock because signature expiry is
    /// checked against it.
    ///
    /// # Errors
    ///
    /// Returns an error when registration or signing fails.
    pub async fn sign_up(&self, name: &str, role: &str) -> Result<String, eyre::Report> {
        let email = format!("{}@lyceum.test", name.to_lowercase());
        let user = self
            .identity
            .register_user(RegisterUserRequest::new(name, email, role))
            .await?;
        let token = self.issuer.issue(user.id(), user.role(), &DefaultClock)?;
        Ok(format!("Bearer {token}"))
    }

    /// Registers a user and resolves their context through the verifier.
    ///
    /// # Errors
    ///
    /// Returns an error when registration, signing, or verification fails.
    pub async fn login(&self, name: &str, role: &str) -> Result<AuthContext, eyre::Report> {
        let header = self.sign_up(name, role).await?;
        Ok(self.identity.authenticate(&header)?)
    }
}
