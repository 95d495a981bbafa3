//! User domain types.

use chrono::{DateTime, Utc};

use fretwork_core::{UserId, Username};

/// A catalog user (domain type).
///
/// The credential hash never leaves the repository layer; this type carries
/// only what handlers and templates need.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Unique login name.
    pub username: Username,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}
