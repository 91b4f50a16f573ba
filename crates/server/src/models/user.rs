//! User domain types.

use chrono::{DateTime, Utc};

use cartify_core::{Email, Role, UserId};

/// A Cartify user account (domain type).
///
/// The password hash never lives on this type; repositories return it
/// separately to the one call site that verifies credentials.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address (unique, case-insensitively).
    pub email: Email,
    /// Role controlling which operations the guard permits.
    pub role: Role,
    /// Avatar image URL.
    pub avatar: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Default address.
    pub address: Option<String>,
    /// Accumulated reward points.
    pub rewards: i32,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// The identity value handed to business logic after authentication.
    #[must_use]
    pub const fn identity(&self) -> Identity {
        Identity {
            id: self.id,
            role: self.role,
        }
    }
}

/// The authenticated caller, as seen by everything downstream of the guard.
///
/// Deliberately carries only `{id, role}` so full credential records never
/// leak into business logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    /// The authenticated user's ID.
    pub id: UserId,
    /// The authenticated user's role.
    pub role: Role,
}
