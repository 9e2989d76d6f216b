//! User-related DTOs for the management endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::User;

/// One user as returned by the API.
///
/// `role` is the display projection of the two flags; the flags are
/// authoritative.
#[derive(Debug, Serialize)]
pub struct UserDto {
    /// User identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Event-management flag.
    pub is_admin: bool,
    /// User-management flag.
    pub is_superadmin: bool,
    /// Derived display role.
    pub role: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        let role = user.role().to_string();
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            is_admin: user.is_admin,
            is_superadmin: user.is_superadmin,
            role,
        }
    }
}

/// Request body for promote/demote actions.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AdminActionRequest {
    /// The acting superadmin.
    pub actor_id: Uuid,
}

/// Query parameters for `GET /users`.
#[derive(Debug, Deserialize)]
pub struct ListUsersParams {
    /// The acting superadmin.
    pub actor_id: Uuid,
}

/// Response body for `GET /users`.
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    /// The users, sorted by name.
    pub data: Vec<UserDto>,
    /// Number of users returned.
    pub total: usize,
}
