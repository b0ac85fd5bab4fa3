use serde::{Deserialize, Serialize};

use crate::utils::contains_ignore_case;

use super::{Role, UserAccount};

/// Platform-wide counters shown on the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminStats {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub total_candidates: u64,
    #[serde(default)]
    pub total_companies: u64,
    #[serde(default)]
    pub total_jobs: u64,
    #[serde(default)]
    pub active_jobs: u64,
    #[serde(default)]
    pub total_applications: u64,
}

impl AdminStats {
    pub fn inactive_jobs(&self) -> u64 {
        self.total_jobs.saturating_sub(self.active_jobs)
    }
}

/// Client-side filter for the admin user listing.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    /// Matches name or email
    pub query: Option<String>,
    pub role: Option<Role>,
}

impl UserFilter {
    pub fn matches(&self, user: &UserAccount) -> bool {
        if let Some(ref q) = self.query {
            if !(contains_ignore_case(&user.name, q) || contains_ignore_case(&user.email, q)) {
                return false;
            }
        }
        self.role.map(|r| r == user.role).unwrap_or(true)
    }

    pub fn apply<'a>(&self, users: &'a [UserAccount]) -> Vec<&'a UserAccount> {
        users.iter().filter(|u| self.matches(u)).collect()
    }
}
