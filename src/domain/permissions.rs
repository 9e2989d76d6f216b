//! Permission policy: pure decision table over the two capability flags.
//!
//! Nothing here is stored; every function is a pure decision over a
//! [`User`]'s `is_admin` / `is_superadmin` flags plus a handful of
//! domain rules (cannot act on self, cannot touch a superadmin).

use std::str::FromStr;

use super::User;
use crate::error::CoreError;

/// Whether the user may place wagers.
///
/// Superadmins are a management-only role and may never wager,
/// regardless of the admin flag.
#[must_use]
pub const fn can_wager(user: &User) -> bool {
    !user.is_superadmin
}

/// Whether the user may manage events (open, close, resolve, reset).
#[must_use]
pub const fn can_manage_events(user: &User) -> bool {
    user.is_admin || user.is_superadmin
}

/// Whether the user may manage other users.
#[must_use]
pub const fn can_manage_users(user: &User) -> bool {
    user.is_superadmin
}

/// Checks that `actor` may promote `target` to admin.
///
/// # Errors
///
/// Returns [`CoreError::Permission`] unless the actor is a superadmin,
/// or if the target is a superadmin (a superadmin can never be
/// promoted or demoted by this path).
pub fn ensure_can_promote(actor: &User, target: &User) -> Result<(), CoreError> {
    if !actor.is_superadmin {
        return Err(CoreError::Permission(
            "only superadmins can promote users".to_string(),
        ));
    }
    if target.is_superadmin {
        return Err(CoreError::Permission(
            "a superadmin cannot be promoted or demoted".to_string(),
        ));
    }
    Ok(())
}

/// Checks that `actor` may demote `target` from admin.
///
/// # Errors
///
/// Same shape as [`ensure_can_promote`].
pub fn ensure_can_demote(actor: &User, target: &User) -> Result<(), CoreError> {
    ensure_can_promote(actor, target)
}

/// Checks that `actor` may delete `target`.
///
/// # Errors
///
/// Returns [`CoreError::Permission`] unless the actor is a superadmin,
/// if the target is a superadmin, or if the actor targets itself.
pub fn ensure_can_delete_user(actor: &User, target: &User) -> Result<(), CoreError> {
    if !actor.is_superadmin {
        return Err(CoreError::Permission(
            "only superadmins can delete users".to_string(),
        ));
    }
    if target.is_superadmin {
        return Err(CoreError::Permission(
            "a superadmin cannot be deleted".to_string(),
        ));
    }
    if actor.id == target.id {
        return Err(CoreError::Permission(
            "users cannot delete themselves".to_string(),
        ));
    }
    Ok(())
}

/// Event-management actions subject to the permission gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventAction {
    /// Reopen wagering.
    Open,
    /// Close wagering.
    Close,
    /// Define the winning outcome.
    DefineWinner,
    /// Archive the active event and start a new one.
    Reset,
    /// Create the first event.
    Create,
}

impl FromStr for EventAction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "close" => Ok(Self::Close),
            "define_winner" => Ok(Self::DefineWinner),
            "reset" => Ok(Self::Reset),
            "create" => Ok(Self::Create),
            other => Err(CoreError::Validation(format!(
                "unknown event action: {other}"
            ))),
        }
    }
}

/// Checks that `user` may perform the given event action.
///
/// # Errors
///
/// Returns [`CoreError::Permission`] unless the user may manage
/// events. Unknown action strings fail earlier, in
/// [`EventAction::from_str`], with [`CoreError::Validation`].
pub fn ensure_event_action(user: &User, action: EventAction) -> Result<(), CoreError> {
    if can_manage_events(user) {
        Ok(())
    } else {
        Err(CoreError::Permission(format!(
            "user {} may not perform event action {action:?}",
            user.id
        )))
    }
}
