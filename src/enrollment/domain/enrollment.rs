//! Enrollment records.

use super::{Course, CourseId, EnrollmentId};
use crate::identity::domain::{UserId, UserSummary};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A user's place on a course. Unique per user and course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    id: EnrollmentId,
    user_id: UserId,
    course_id: CourseId,
    created_at: DateTime<Utc>,
}

impl Enrollment {
    /// Enrolls `user_id` on `course_id` now.
    #[must_use]
    pub fn new(user_id: UserId, course_id: CourseId, clock: &impl Clock) -> Self {
        Self {
            id: EnrollmentId::new(),
            user_id,
            course_id,
            created_at: clock.utc(),
        }
    }

    /// Returns the enrollment identifier.
    #[must_use]
    pub const fn id(&self) -> EnrollmentId {
        self.id
    }

    /// Returns the enrolled user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the course.
    #[must_use]
    pub const fn course_id(&self) -> CourseId {
        self.course_id
    }

    /// Returns when the enrollment was made.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// An enrollment joined with its course and user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentEntry {
    /// Stored enrollment.
    pub enrollment: Enrollment,
    /// Course, when it still exists.
    pub course: Option<Course>,
    /// Enrolled user, when present in the directory.
    pub user: Option<UserSummary>,
}
