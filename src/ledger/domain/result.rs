//! Exam results and scores.

use super::{ExamResultId, LedgerDomainError};
use crate::identity::domain::UserId;
use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Non-negative integer exam score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(u64);

impl Score {
    /// Creates a score.
    #[must_use]
    pub const fn new(points: u64) -> Self {
        Self(points)
    }

    /// Reads a score from an untyped request value.
    ///
    /// JSON integers of zero or more are accepted, as are floats with no
    /// fractional part (`5.0`) that fit in a `u64`. Strings such as `"5"`,
    /// negative numbers, and fractions are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerDomainError::InvalidScore`] for anything else.
    pub fn from_json(value: &Value) -> Result<Self, LedgerDomainError> {
        value
            .as_u64()
            .or_else(|| value.as_f64().and_then(integral_points))
            .map(Self)
            .ok_or_else(|| LedgerDomainError::InvalidScore(value.to_string()))
    }

    /// Returns the points.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

/// Whole, non-negative float rendered back through its decimal digits.
/// Values past `u64::MAX` fail the parse.
fn integral_points(raw: f64) -> Option<u64> {
    if !raw.is_finite() || raw < 0.0 || raw.fract() != 0.0 {
        return None;
    }
    format!("{:.0}", raw.abs()).parse().ok()
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Scored outcome of a student sitting an exam.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamResult {
    id: ExamResultId,
    exam_id: TaskId,
    user_id: UserId,
    score: Score,
    details: Option<Value>,
    created_at: DateTime<Utc>,
}

impl ExamResult {
    /// Records a result for `user_id` on `exam_id` now. `details` is kept
    /// verbatim.
    #[must_use]
    pub fn record(
        exam_id: TaskId,
        user_id: UserId,
        score: Score,
        details: Option<Value>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: ExamResultId::new(),
            exam_id,
            user_id,
            score,
            details,
            created_at: clock.utc(),
        }
    }

    /// Returns the result identifier.
    #[must_use]
    pub const fn id(&self) -> ExamResultId {
        self.id
    }

    /// Returns the exam.
    #[must_use]
    pub const fn exam_id(&self) -> TaskId {
        self.exam_id
    }

    /// Returns the student.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the score.
    #[must_use]
    pub const fn score(&self) -> Score {
        self.score
    }

    /// Returns the opaque answer payload, if any.
    #[must_use]
    pub const fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Returns when the result was recorded.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
