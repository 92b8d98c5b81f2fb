//! Active domain entry

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A domain that has been provisioned and is monitored for delegation.
///
/// Field names on disk and in `/domains.json` are `name`,
/// `nameservers_correct` and `last_checked`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRecord {
    /// Domain name
    pub name: String,
    /// Result of the most recent delegation check
    #[serde(rename = "nameservers_correct")]
    pub delegation_verified: bool,
    /// When the delegation was last checked
    #[serde(rename = "last_checked", with = "crate::utils::datetime")]
    pub last_checked_at: DateTime<Utc>,
}

impl DomainRecord {
    #[must_use]
    pub fn new(name: impl Into<String>, delegation_verified: bool, at: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            delegation_verified,
            last_checked_at: at,
        }
    }

    /// Entry for a name that just passed verification and provisioning.
    #[must_use]
    pub fn graduated(name: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self::new(name, true, at)
    }

    /// Record a check result. The timestamp never moves backwards.
    pub fn record_check(&mut self, verified: bool, at: DateTime<Utc>) {
        self.delegation_verified = verified;
        self.last_checked_at = self.last_checked_at.max(at);
    }
}
