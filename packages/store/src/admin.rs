//! Admin panel helpers: status and role labels, storage usage and the users
//! table filter.

use crate::models::{Role, SystemStats, User, UserStatus};

impl UserStatus {
    pub fn label(&self) -> &'static str {
        match self {
            UserStatus::Active => "Active",
            UserStatus::Inactive => "Inactive",
            UserStatus::Suspended => "Suspended",
        }
    }
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Moderator => "Mod",
            Role::User => "User",
        }
    }
}

impl SystemStats {
    /// Used storage as a percentage of the total, rounded to one decimal.
    pub fn storage_used_percent(&self) -> f64 {
        if self.storage_total <= 0.0 {
            return 0.0;
        }
        (self.storage_used / self.storage_total * 1000.0).round() / 10.0
    }
}

/// Rows matching the role and status filters and whose name or email contains
/// `query`, ignoring case. An empty query matches everything.
pub fn filter_users<'a>(
    users: &'a [User],
    role: Option<Role>,
    status: Option<UserStatus>,
    query: &str,
) -> Vec<&'a User> {
    let query = query.trim().to_lowercase();
    users
        .iter()
        .filter(|u| role.map_or(true, |r| u.role == r))
        .filter(|u| status.map_or(true, |s| u.status == s))
        .filter(|u| {
            query.is_empty()
                || u.name.to_lowercase().contains(&query)
                || u.email.to_lowercase().contains(&query)
        })
        .collect()
}
