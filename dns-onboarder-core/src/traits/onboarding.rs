//! Onboarding step abstractions

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::services::RecordTable;

/// Decides whether a domain is delegated to the expected nameservers.
///
/// Never fails: anything that prevents a positive answer is `false`.
#[async_trait]
pub trait DelegationVerifier: Send + Sync {
    async fn verify(&self, name: &str) -> bool;
}

/// Creates the hosted zone for a domain and seeds its records.
///
/// Returns `true` once the zone exists and every template row was attempted.
#[async_trait]
pub trait ZoneProvisioner: Send + Sync {
    async fn provision(&self, name: &str) -> bool;
}

/// Supplies the record table used for provisioning.
#[async_trait]
pub trait RecordTemplateSource: Send + Sync {
    /// Load and parse the table. Unreadable or malformed tables are errors;
    /// invalid individual rows are not.
    async fn load(&self) -> CoreResult<RecordTable>;
}
