//! Authorization guards for Lyceum.
//!
//! Every mutating operation in the task store, the submission ledger, and
//! the enrollment service runs one of these guards before touching any
//! repository. A failed guard leaves storage untouched.

mod guard;

pub use guard::{AccessDenied, require_admin, require_owner_or_admin, require_student};
