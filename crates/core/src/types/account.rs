//! User account domain type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AccountId, Email};

/// A user account as the purge sees it.
///
/// Accounts are partitioned into *staff* (the `is_staff` or `is_superuser`
/// flag is set) and *customers* (neither flag). Customers are always removed
/// by a purge; staff are retained unless deletion is explicitly requested,
/// and superusers are never deleted by this tooling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique account ID.
    pub id: AccountId,
    /// The account's email address.
    pub email: Email,
    /// Whether the account belongs to a staff member.
    pub is_staff: bool,
    /// Whether the account has superuser privileges.
    pub is_superuser: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// True for accounts exempt from the customer purge.
    #[must_use]
    pub const fn is_staff_member(&self) -> bool {
        self.is_staff || self.is_superuser
    }
}
