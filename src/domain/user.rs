//! User role view.
//!
//! The core only cares about a user's identity and its two capability
//! flags. The `role` label shown to humans is a pure projection of the
//! flags computed at the presentation boundary; it is never persisted
//! and never branched on.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user as seen by the wagering core.
///
/// `is_admin` and `is_superadmin` are two orthogonal booleans; the
/// source of truth for every permission decision. Nothing enforces
/// `is_superadmin` implying `is_admin`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Display name, denormalized onto wagers at placement time.
    pub name: String,
    /// Login email (unique).
    pub email: String,
    /// Event-management capability flag.
    pub is_admin: bool,
    /// User-management capability flag. Superadmins may not wager.
    pub is_superadmin: bool,
}

impl User {
    /// Derives the display role from the capability flags.
    ///
    /// Superadmin wins over admin when both flags are set.
    #[must_use]
    pub const fn role(&self) -> Role {
        if self.is_superadmin {
            Role::Superadmin
        } else if self.is_admin {
            Role::Admin
        } else {
            Role::User
        }
    }
}

/// Display-only role label derived from the two capability flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Ordinary bettor.
    User,
    /// May manage events.
    Admin,
    /// May manage users; may not wager.
    Superadmin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::Superadmin => "superadmin",
        };
        write!(f, "{label}")
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
pub(crate) mod tests {
    use super::*;

    /// Builds a user with the given flags for permission tests.
    pub(crate) fn make_user(is_admin: bool, is_superadmin: bool) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            is_admin,
            is_superadmin,
        }
    }

    #[test]
    fn role_projection() {
        assert_eq!(make_user(false, false).role(), Role::User);
        assert_eq!(make_user(true, false).role(), Role::Admin);
        assert_eq!(make_user(true, true).role(), Role::Superadmin);
        // The flags are orthogonal: a superadmin without the admin flag
        // is still labeled superadmin.
        assert_eq!(make_user(false, true).role(), Role::Superadmin);
    }

    #[test]
    fn role_label_rendering() {
        assert_eq!(Role::User.to_string(), "user");
        assert_eq!(Role::Admin.to_string(), "admin");
        assert_eq!(Role::Superadmin.to_string(), "superadmin");
    }
}
