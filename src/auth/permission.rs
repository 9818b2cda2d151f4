//! Role-based authorization check.

use crate::db::Role;

/// Decide whether a caller with `caller` role may perform an operation
/// restricted to `allowed` roles.
///
/// An empty `allowed` set means the operation is open to any
/// authenticated caller.
///
/// # Examples
///
/// ```
/// use credo::{authorize, Role};
///
/// assert!(authorize(Role::Admin, &[Role::Admin]));
/// assert!(!authorize(Role::User, &[Role::Admin]));
/// assert!(authorize(Role::User, &[]));
/// ```
pub fn authorize(caller: Role, allowed: &[Role]) -> bool {
    allowed.is_empty() || allowed.contains(&caller)
}
