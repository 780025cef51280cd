//! Unit tests for the submission ledger.
