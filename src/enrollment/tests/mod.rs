//! Unit tests for courses and enrollments.
